use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TASK_PREFIX: &str = "cms-performance-tbl-auto-consortium";

/// Hauptkonfiguration für das DMS Runbook
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_region")]
    pub aws_region: String,
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
    /// Optional: Mapping-Datei aus dem DMS Wizard statt der eingebauten Regeln
    #[serde(default)]
    pub table_mappings_file: Option<PathBuf>,
    #[serde(default = "default_task_prefix")]
    pub task_identifier_prefix: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub instance: InstanceConfig,
    #[serde(default)]
    pub assume_role: Option<AssumeRoleConfig>,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

/// Replication Instance Parameter (einmal angelegt, von allen Tasks genutzt)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    pub identifier: String,
    pub arn: Option<String>,
    pub instance_class: String,
    pub allocated_storage: i32,
    pub vpc_security_group_ids: Vec<String>,
    pub availability_zone: String,
    pub subnet_group: String,
    pub multi_az: bool,
    pub engine_version: String,
    pub auto_minor_version_upgrade: bool,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            identifier: "cmsperformance".to_string(),
            arn: None,
            // dms.c5.xlarge geht auch, c4.large reicht aber
            instance_class: "dms.c4.large".to_string(),
            allocated_storage: 50,
            vpc_security_group_ids: vec!["sg-bcc371c6".to_string(), "sg-98dcc7fa".to_string()],
            availability_zone: "us-west-2a".to_string(),
            subnet_group: "default-vpc-1b322279".to_string(),
            multi_az: false,
            engine_version: "3.4.6".to_string(),
            auto_minor_version_upgrade: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssumeRoleConfig {
    pub role_arn: String,
    #[serde(default)]
    pub session_name: Option<String>,
}

impl AssumeRoleConfig {
    pub fn session_name(&self) -> String {
        self.session_name
            .clone()
            .unwrap_or_else(|| format!("dms-runbook-{}", uuid::Uuid::new_v4()))
    }
}

/// Pro-Environment Daten (dev/stage/prod). Fehlende Felder werden abgeleitet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub endpoint_name: Option<String>,
    pub host_parameter: Option<String>,
    pub password_parameter: Option<String>,
    pub source_endpoint_arn: Option<String>,
    pub target_endpoint_arn: Option<String>,
    pub replication_instance_arn: Option<String>,
    pub task_arn: Option<String>,
}

/// Aufgelöstes Environment mit allen Defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub name: String,
    pub endpoint_name: String,
    pub host_parameter: String,
    pub password_parameter: String,
    pub source_endpoint_arn: Option<String>,
    pub target_endpoint_arn: Option<String>,
    pub replication_instance_arn: Option<String>,
    pub task_arn: Option<String>,
}

impl Config {
    /// Lade Config aus TOML-Datei (optional), .env und DMS_RUNBOOK_* Variablen
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("DMS_RUNBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Environment auflösen; unbekannte Namen bekommen die abgeleiteten Defaults
    pub fn environment(&self, name: &str) -> Environment {
        let configured = self.environments.get(name).cloned().unwrap_or_default();

        Environment {
            name: name.to_string(),
            endpoint_name: configured
                .endpoint_name
                .unwrap_or_else(|| format!("cms-{}-tbl-auto-consortium-cms", name)),
            host_parameter: configured
                .host_parameter
                .unwrap_or_else(|| format!("/apps/cms/db/cms-{}/host", name)),
            password_parameter: configured
                .password_parameter
                .unwrap_or_else(|| format!("/apps/cms/db/cms-{}/password", name)),
            source_endpoint_arn: configured.source_endpoint_arn,
            target_endpoint_arn: configured.target_endpoint_arn,
            replication_instance_arn: configured
                .replication_instance_arn
                .or_else(|| self.instance.arn.clone()),
            task_arn: configured.task_arn,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: default_region(),
            settings_file: default_settings_file(),
            table_mappings_file: None,
            task_identifier_prefix: default_task_prefix(),
            log_dir: None,
            instance: InstanceConfig::default(),
            assume_role: None,
            environments: BTreeMap::new(),
        }
    }
}

fn default_region() -> String {
    std::env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string())
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("dms_settings.json")
}

fn default_task_prefix() -> String {
    DEFAULT_TASK_PREFIX.to_string()
}
