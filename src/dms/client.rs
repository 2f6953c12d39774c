use crate::dms::models::{
    EndpointRequest, EndpointSummary, InstanceSummary, ReplicationInstanceRequest,
    ReplicationTaskRequest, ResourceTag, StartTaskRequest, TaskSummary,
};
use crate::error::{Result, RunbookError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_databasemigration::error::DisplayErrorContext;
use aws_sdk_databasemigration::primitives::DateTime;
use aws_sdk_databasemigration::types::{
    DmsSslModeValue, Endpoint, MigrationTypeValue, PostgreSqlSettings, ReplicationEndpointTypeValue,
    ReplicationInstance, ReplicationTask, StartReplicationTaskTypeValue, Tag,
};
use aws_sdk_databasemigration::Client;

/// DMS Administrations-API. Jede Methode ist genau ein Remote Call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MigrationService: Send + Sync {
    async fn create_replication_instance(
        &self,
        request: &ReplicationInstanceRequest,
    ) -> Result<InstanceSummary>;
    async fn delete_replication_instance(&self, instance_arn: &str) -> Result<InstanceSummary>;
    async fn create_endpoint(&self, request: &EndpointRequest) -> Result<EndpointSummary>;
    async fn delete_endpoint(&self, endpoint_arn: &str) -> Result<EndpointSummary>;
    async fn describe_endpoints(&self) -> Result<Vec<EndpointSummary>>;
    async fn create_replication_task(
        &self,
        request: &ReplicationTaskRequest,
    ) -> Result<TaskSummary>;
    async fn delete_replication_task(&self, task_arn: &str) -> Result<TaskSummary>;
    async fn describe_replication_tasks(&self) -> Result<Vec<TaskSummary>>;
    async fn start_replication_task(&self, request: &StartTaskRequest) -> Result<TaskSummary>;
    async fn stop_replication_task(&self, task_arn: &str) -> Result<TaskSummary>;
}

/// AWS DMS Client
pub struct DmsClient {
    client: Client,
}

impl DmsClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

fn remote<E: std::error::Error>(operation: &'static str) -> impl FnOnce(E) -> RunbookError {
    move |e| RunbookError::remote("dms", operation, DisplayErrorContext(&e).to_string())
}

fn missing(operation: &'static str, field: &'static str) -> RunbookError {
    RunbookError::MissingField {
        service: "dms",
        operation,
        field,
    }
}

fn to_sdk_tags(tags: &[ResourceTag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| {
            Tag::builder()
                .key(&t.key)
                .value(&t.value)
                .resource_arn(&t.resource_arn)
                .build()
        })
        .collect()
}

fn to_sdk_time(time: Option<chrono::DateTime<chrono::Utc>>) -> Option<DateTime> {
    time.map(|t| DateTime::from_secs_and_nanos(t.timestamp(), t.timestamp_subsec_nanos()))
}

#[async_trait]
impl MigrationService for DmsClient {
    async fn create_replication_instance(
        &self,
        request: &ReplicationInstanceRequest,
    ) -> Result<InstanceSummary> {
        let response = self
            .client
            .create_replication_instance()
            .replication_instance_identifier(&request.identifier)
            .allocated_storage(request.allocated_storage)
            .replication_instance_class(&request.instance_class)
            .set_vpc_security_group_ids(Some(request.vpc_security_group_ids.clone()))
            .availability_zone(&request.availability_zone)
            .replication_subnet_group_identifier(&request.subnet_group)
            .multi_az(request.multi_az)
            .engine_version(&request.engine_version)
            .auto_minor_version_upgrade(request.auto_minor_version_upgrade)
            .set_tags(Some(to_sdk_tags(&request.tags)))
            .publicly_accessible(request.publicly_accessible)
            .send()
            .await
            .map_err(remote("CreateReplicationInstance"))?;

        response
            .replication_instance()
            .map(InstanceSummary::from)
            .ok_or_else(|| missing("CreateReplicationInstance", "ReplicationInstance"))
    }

    async fn delete_replication_instance(&self, instance_arn: &str) -> Result<InstanceSummary> {
        let response = self
            .client
            .delete_replication_instance()
            .replication_instance_arn(instance_arn)
            .send()
            .await
            .map_err(remote("DeleteReplicationInstance"))?;

        response
            .replication_instance()
            .map(InstanceSummary::from)
            .ok_or_else(|| missing("DeleteReplicationInstance", "ReplicationInstance"))
    }

    async fn create_endpoint(&self, request: &EndpointRequest) -> Result<EndpointSummary> {
        let pg = &request.postgres_settings;
        let postgres_settings = PostgreSqlSettings::builder()
            .database_name(&pg.database_name)
            .port(pg.port)
            .server_name(&pg.server_name)
            .username(&pg.username)
            .password(&pg.password)
            .build();

        let response = self
            .client
            .create_endpoint()
            .endpoint_identifier(&request.identifier)
            .endpoint_type(ReplicationEndpointTypeValue::from(request.endpoint_type.as_str()))
            .engine_name(&request.engine_name)
            .username(&request.username)
            .password(&request.password)
            .server_name(&request.server_name)
            .port(request.port)
            .database_name(&request.database_name)
            .extra_connection_attributes(&request.extra_connection_attributes)
            .postgre_sql_settings(postgres_settings)
            .ssl_mode(DmsSslModeValue::from(request.ssl_mode.as_str()))
            .send()
            .await
            .map_err(remote("CreateEndpoint"))?;

        response
            .endpoint()
            .map(EndpointSummary::from)
            .ok_or_else(|| missing("CreateEndpoint", "Endpoint"))
    }

    async fn delete_endpoint(&self, endpoint_arn: &str) -> Result<EndpointSummary> {
        let response = self
            .client
            .delete_endpoint()
            .endpoint_arn(endpoint_arn)
            .send()
            .await
            .map_err(remote("DeleteEndpoint"))?;

        response
            .endpoint()
            .map(EndpointSummary::from)
            .ok_or_else(|| missing("DeleteEndpoint", "Endpoint"))
    }

    async fn describe_endpoints(&self) -> Result<Vec<EndpointSummary>> {
        let response = self
            .client
            .describe_endpoints()
            .send()
            .await
            .map_err(remote("DescribeEndpoints"))?;

        Ok(response.endpoints().iter().map(EndpointSummary::from).collect())
    }

    async fn create_replication_task(
        &self,
        request: &ReplicationTaskRequest,
    ) -> Result<TaskSummary> {
        let response = self
            .client
            .create_replication_task()
            .replication_task_identifier(&request.identifier)
            .source_endpoint_arn(&request.source_endpoint_arn)
            .target_endpoint_arn(&request.target_endpoint_arn)
            .replication_instance_arn(&request.replication_instance_arn)
            .migration_type(MigrationTypeValue::from(request.migration_type.as_str()))
            .table_mappings(&request.table_mappings)
            .replication_task_settings(&request.settings)
            .set_tags(Some(to_sdk_tags(&request.tags)))
            .set_cdc_start_time(to_sdk_time(request.cdc_start_time))
            .send()
            .await
            .map_err(remote("CreateReplicationTask"))?;

        response
            .replication_task()
            .map(TaskSummary::from)
            .ok_or_else(|| missing("CreateReplicationTask", "ReplicationTask"))
    }

    async fn delete_replication_task(&self, task_arn: &str) -> Result<TaskSummary> {
        let response = self
            .client
            .delete_replication_task()
            .replication_task_arn(task_arn)
            .send()
            .await
            .map_err(remote("DeleteReplicationTask"))?;

        response
            .replication_task()
            .map(TaskSummary::from)
            .ok_or_else(|| missing("DeleteReplicationTask", "ReplicationTask"))
    }

    async fn describe_replication_tasks(&self) -> Result<Vec<TaskSummary>> {
        let response = self
            .client
            .describe_replication_tasks()
            .send()
            .await
            .map_err(remote("DescribeReplicationTasks"))?;

        Ok(response.replication_tasks().iter().map(TaskSummary::from).collect())
    }

    async fn start_replication_task(&self, request: &StartTaskRequest) -> Result<TaskSummary> {
        let response = self
            .client
            .start_replication_task()
            .replication_task_arn(&request.task_arn)
            .start_replication_task_type(StartReplicationTaskTypeValue::from(
                request.start_type.as_str(),
            ))
            .set_cdc_start_time(to_sdk_time(request.cdc_start_time))
            .send()
            .await
            .map_err(remote("StartReplicationTask"))?;

        response
            .replication_task()
            .map(TaskSummary::from)
            .ok_or_else(|| missing("StartReplicationTask", "ReplicationTask"))
    }

    async fn stop_replication_task(&self, task_arn: &str) -> Result<TaskSummary> {
        let response = self
            .client
            .stop_replication_task()
            .replication_task_arn(task_arn)
            .send()
            .await
            .map_err(remote("StopReplicationTask"))?;

        response
            .replication_task()
            .map(TaskSummary::from)
            .ok_or_else(|| missing("StopReplicationTask", "ReplicationTask"))
    }
}

impl From<&ReplicationInstance> for InstanceSummary {
    fn from(instance: &ReplicationInstance) -> Self {
        Self {
            arn: instance.replication_instance_arn().map(str::to_string),
            identifier: instance.replication_instance_identifier().map(str::to_string),
            instance_class: instance.replication_instance_class().map(str::to_string),
            status: instance.replication_instance_status().map(str::to_string),
        }
    }
}

impl From<&Endpoint> for EndpointSummary {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            arn: endpoint.endpoint_arn().map(str::to_string),
            identifier: endpoint.endpoint_identifier().map(str::to_string),
            endpoint_type: endpoint.endpoint_type().map(|t| t.as_str().to_string()),
            engine_name: endpoint.engine_name().map(str::to_string),
            server_name: endpoint.server_name().map(str::to_string),
            status: endpoint.status().map(str::to_string),
        }
    }
}

impl From<&ReplicationTask> for TaskSummary {
    fn from(task: &ReplicationTask) -> Self {
        Self {
            arn: task.replication_task_arn().map(str::to_string),
            identifier: task.replication_task_identifier().map(str::to_string),
            migration_type: task.migration_type().map(|t| t.as_str().to_string()),
            status: task.status().map(str::to_string),
            last_failure_message: task.last_failure_message().map(str::to_string),
        }
    }
}
