use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source oder Target Endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    Source,
    Target,
}

impl EndpointType {
    pub fn as_str(&self) -> &str {
        match self {
            EndpointType::Source => "source",
            EndpointType::Target => "target",
        }
    }
}

/// Dieses Runbook legt nur Full-Load Tasks an
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationType {
    FullLoad,
}

impl MigrationType {
    pub fn as_str(&self) -> &str {
        match self {
            MigrationType::FullLoad => "full-load",
        }
    }
}

/// StartReplicationTaskType
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StartType {
    StartReplication,
    ResumeProcessing,
    ReloadTarget,
}

impl StartType {
    pub fn as_str(&self) -> &str {
        match self {
            StartType::StartReplication => "start-replication",
            StartType::ResumeProcessing => "resume-processing",
            StartType::ReloadTarget => "reload-target",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
    pub resource_arn: String,
}

/// CreateReplicationInstance Request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplicationInstanceRequest {
    pub identifier: String,
    pub allocated_storage: i32,
    pub instance_class: String,
    pub vpc_security_group_ids: Vec<String>,
    pub availability_zone: String,
    pub subnet_group: String,
    pub multi_az: bool,
    pub engine_version: String,
    pub auto_minor_version_upgrade: bool,
    pub publicly_accessible: bool,
    pub tags: Vec<ResourceTag>,
}

#[derive(Clone, Serialize, PartialEq)]
pub struct PostgresSettings {
    pub database_name: String,
    pub port: i32,
    pub server_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// CreateEndpoint Request
#[derive(Clone, Serialize, PartialEq)]
pub struct EndpointRequest {
    pub identifier: String,
    pub endpoint_type: EndpointType,
    pub engine_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub server_name: String,
    pub port: i32,
    pub database_name: String,
    pub extra_connection_attributes: String,
    pub postgres_settings: PostgresSettings,
    pub ssl_mode: String,
}

// Passwörter tauchen nie in Logs auf
impl std::fmt::Debug for EndpointRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRequest")
            .field("identifier", &self.identifier)
            .field("endpoint_type", &self.endpoint_type)
            .field("engine_name", &self.engine_name)
            .field("server_name", &self.server_name)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .finish_non_exhaustive()
    }
}

/// CreateReplicationTask Request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplicationTaskRequest {
    pub identifier: String,
    pub source_endpoint_arn: String,
    pub target_endpoint_arn: String,
    pub replication_instance_arn: String,
    pub migration_type: MigrationType,
    pub table_mappings: String,
    pub settings: String,
    pub tags: Vec<ResourceTag>,
    pub cdc_start_time: Option<DateTime<Utc>>,
}

/// StartReplicationTask Request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StartTaskRequest {
    pub task_arn: String,
    pub start_type: StartType,
    pub cdc_start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstanceSummary {
    pub arn: Option<String>,
    pub identifier: Option<String>,
    pub instance_class: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EndpointSummary {
    pub arn: Option<String>,
    pub identifier: Option<String>,
    pub endpoint_type: Option<String>,
    pub engine_name: Option<String>,
    pub server_name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskSummary {
    pub arn: Option<String>,
    pub identifier: Option<String>,
    pub migration_type: Option<String>,
    pub status: Option<String>,
    pub last_failure_message: Option<String>,
}
