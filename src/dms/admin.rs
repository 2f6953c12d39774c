use crate::dms::client::MigrationService;
use crate::dms::models::{
    EndpointRequest, EndpointSummary, EndpointType, InstanceSummary, MigrationType,
    PostgresSettings, ReplicationInstanceRequest, ReplicationTaskRequest, ResourceTag,
    StartTaskRequest, StartType, TaskSummary,
};
use crate::error::Result;
use crate::mapping::TaskPayload;
use crate::utils::InstanceConfig;
use chrono::{DateTime, Utc};

pub const ENGINE_NAME: &str = "aurora-postgresql";
pub const DB_USERNAME: &str = "postgres";
pub const DB_NAME: &str = "postgres";
pub const DB_PORT: i32 = 5432;
pub const SSL_MODE: &str = "none";

/// test_decoding Plugin + Heartbeat Tuning für Aurora PostgreSQL
pub const EXTRA_CONNECTION_ATTRIBUTES: &str = concat!(
    "pluginName=test_decoding; wal_sender_timeout=0;heartbeatenable=Y;",
    "heartbeatFrequency=1;heartbeatSchema=public;connectionTimeout=120;Executetimeout=600;",
);

pub fn replication_instance_request(
    identifier: &str,
    instance: &InstanceConfig,
) -> ReplicationInstanceRequest {
    ReplicationInstanceRequest {
        identifier: identifier.to_string(),
        allocated_storage: instance.allocated_storage,
        instance_class: instance.instance_class.clone(),
        vpc_security_group_ids: instance.vpc_security_group_ids.clone(),
        availability_zone: instance.availability_zone.clone(),
        subnet_group: instance.subnet_group.clone(),
        multi_az: instance.multi_az,
        engine_version: instance.engine_version.clone(),
        auto_minor_version_upgrade: instance.auto_minor_version_upgrade,
        publicly_accessible: false,
        tags: vec![ResourceTag {
            key: "cms".to_string(),
            value: "cms-performance".to_string(),
            resource_arn: "cms-performance-tool".to_string(),
        }],
    }
}

/// Endpoint Request; Identifier ist immer `{name}-{type}`
pub fn endpoint_request(
    name: &str,
    endpoint_type: EndpointType,
    server_name: &str,
    password: &str,
) -> EndpointRequest {
    EndpointRequest {
        identifier: format!("{}-{}", name, endpoint_type.as_str()),
        endpoint_type,
        engine_name: ENGINE_NAME.to_string(),
        username: DB_USERNAME.to_string(),
        password: password.to_string(),
        server_name: server_name.to_string(),
        port: DB_PORT,
        database_name: DB_NAME.to_string(),
        extra_connection_attributes: EXTRA_CONNECTION_ATTRIBUTES.to_string(),
        postgres_settings: PostgresSettings {
            database_name: DB_NAME.to_string(),
            port: DB_PORT,
            server_name: server_name.to_string(),
            username: DB_USERNAME.to_string(),
            password: password.to_string(),
        },
        ssl_mode: SSL_MODE.to_string(),
    }
}

/// Full-Load Task Request; Identifier ist `{prefix}-{env}`
pub fn replication_task_request(
    prefix: &str,
    source_arn: &str,
    target_arn: &str,
    instance_arn: &str,
    env: &str,
    payload: &TaskPayload,
    cdc_start_time: Option<DateTime<Utc>>,
) -> Result<ReplicationTaskRequest> {
    Ok(ReplicationTaskRequest {
        identifier: format!("{}-{}", prefix, env),
        source_endpoint_arn: source_arn.to_string(),
        target_endpoint_arn: target_arn.to_string(),
        replication_instance_arn: instance_arn.to_string(),
        migration_type: MigrationType::FullLoad,
        table_mappings: payload.table_mappings.to_json()?,
        settings: payload.settings.to_json()?,
        tags: vec![ResourceTag {
            key: "cms".to_string(),
            value: format!("cms-{}-task", env),
            resource_arn: "cms-task-tool".to_string(),
        }],
        cdc_start_time,
    })
}

pub fn start_task_request(
    task_arn: &str,
    start_type: StartType,
    cdc_start_time: Option<DateTime<Utc>>,
) -> StartTaskRequest {
    StartTaskRequest {
        task_arn: task_arn.to_string(),
        start_type,
        cdc_start_time,
    }
}

pub async fn create_replication_instance(
    dms: &dyn MigrationService,
    identifier: &str,
    instance: &InstanceConfig,
) -> Result<InstanceSummary> {
    let request = replication_instance_request(identifier, instance);
    let summary = dms.create_replication_instance(&request).await?;

    tracing::info!(
        identifier,
        arn = ?summary.arn,
        instance_class = %request.instance_class,
        "Replication instance created"
    );

    Ok(summary)
}

pub async fn delete_replication_instance(
    dms: &dyn MigrationService,
    instance_arn: &str,
) -> Result<InstanceSummary> {
    let summary = dms.delete_replication_instance(instance_arn).await?;
    tracing::info!(arn = instance_arn, status = ?summary.status, "Replication instance deleted");
    Ok(summary)
}

/// Erstelle Endpoint, z.B.
/// `create_endpoint(dms, "cms-dev-tbl-auto-consortium-cms", Source, host, pw)`
pub async fn create_endpoint(
    dms: &dyn MigrationService,
    name: &str,
    endpoint_type: EndpointType,
    server_name: &str,
    password: &str,
) -> Result<EndpointSummary> {
    let request = endpoint_request(name, endpoint_type, server_name, password);
    let summary = dms.create_endpoint(&request).await?;

    tracing::info!(
        identifier = %request.identifier,
        endpoint_type = endpoint_type.as_str(),
        arn = ?summary.arn,
        "Endpoint created"
    );

    Ok(summary)
}

pub async fn delete_endpoint(
    dms: &dyn MigrationService,
    endpoint_arn: &str,
) -> Result<EndpointSummary> {
    let summary = dms.delete_endpoint(endpoint_arn).await?;
    tracing::info!(arn = endpoint_arn, "Endpoint deleted");
    Ok(summary)
}

pub async fn describe_endpoints(dms: &dyn MigrationService) -> Result<Vec<EndpointSummary>> {
    let endpoints = dms.describe_endpoints().await?;
    tracing::debug!(count = endpoints.len(), "Endpoints described");
    Ok(endpoints)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_replication_task(
    dms: &dyn MigrationService,
    prefix: &str,
    source_arn: &str,
    target_arn: &str,
    instance_arn: &str,
    env: &str,
    payload: &TaskPayload,
    cdc_start_time: Option<DateTime<Utc>>,
) -> Result<TaskSummary> {
    let request = replication_task_request(
        prefix,
        source_arn,
        target_arn,
        instance_arn,
        env,
        payload,
        cdc_start_time,
    )?;
    let summary = dms.create_replication_task(&request).await?;

    tracing::info!(
        identifier = %request.identifier,
        env,
        arn = ?summary.arn,
        "Replication task created"
    );

    Ok(summary)
}

pub async fn describe_replication_tasks(dms: &dyn MigrationService) -> Result<Vec<TaskSummary>> {
    let tasks = dms.describe_replication_tasks().await?;
    tracing::debug!(count = tasks.len(), "Replication tasks described");
    Ok(tasks)
}

pub async fn delete_replication_task(
    dms: &dyn MigrationService,
    task_arn: &str,
) -> Result<TaskSummary> {
    let summary = dms.delete_replication_task(task_arn).await?;
    tracing::info!(arn = task_arn, "Replication task deleted");
    Ok(summary)
}

/// Starte Task: start-replication, resume-processing oder reload-target
pub async fn start_replication_task(
    dms: &dyn MigrationService,
    task_arn: &str,
    start_type: StartType,
    cdc_start_time: Option<DateTime<Utc>>,
) -> Result<TaskSummary> {
    let request = start_task_request(task_arn, start_type, cdc_start_time);
    let summary = dms.start_replication_task(&request).await?;

    tracing::info!(
        arn = task_arn,
        start_type = start_type.as_str(),
        status = ?summary.status,
        "Replication task started"
    );

    Ok(summary)
}

pub async fn stop_replication_task(
    dms: &dyn MigrationService,
    task_arn: &str,
) -> Result<TaskSummary> {
    let summary = dms.stop_replication_task(task_arn).await?;
    tracing::info!(arn = task_arn, status = ?summary.status, "Replication task stopped");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dms::client::MockMigrationService;
    use crate::error::RunbookError;
    use crate::mapping::{TableMappings, TaskSettings};
    use serde_json::{json, Value};

    fn payload() -> TaskPayload {
        TaskPayload {
            table_mappings: TableMappings::consortium(),
            settings: TaskSettings::from_value(json!({ "Logging": { "EnableLogging": true } })),
        }
    }

    #[test]
    fn test_endpoint_request_fixed_fields() {
        for endpoint_type in [EndpointType::Source, EndpointType::Target] {
            let request = endpoint_request(
                "cms-dev-tbl-auto-consortium-cms",
                endpoint_type,
                "db.internal",
                "pw",
            );

            assert_eq!(
                request.identifier,
                format!("cms-dev-tbl-auto-consortium-cms-{}", endpoint_type.as_str())
            );
            assert_eq!(request.endpoint_type, endpoint_type);
            assert_eq!(request.engine_name, "aurora-postgresql");
            assert_eq!(request.port, 5432);
            assert_eq!(request.database_name, "postgres");
            assert_eq!(request.username, "postgres");
            assert_eq!(request.ssl_mode, "none");
            assert_eq!(
                request.extra_connection_attributes,
                "pluginName=test_decoding; wal_sender_timeout=0;heartbeatenable=Y;\
                 heartbeatFrequency=1;heartbeatSchema=public;connectionTimeout=120;\
                 Executetimeout=600;"
            );
            assert_eq!(request.postgres_settings.server_name, "db.internal");
            assert_eq!(request.postgres_settings.password, "pw");
        }
    }

    #[test]
    fn test_endpoint_request_hides_password() {
        let request = endpoint_request("e", EndpointType::Source, "h", "hunter2");

        assert!(!format!("{:?}", request).contains("hunter2"));
        assert!(!serde_json::to_string(&request).unwrap().contains("hunter2"));
    }

    #[test]
    fn test_instance_request_defaults() {
        let request = replication_instance_request("cmsperformance", &InstanceConfig::default());

        assert_eq!(request.instance_class, "dms.c4.large");
        assert_eq!(request.allocated_storage, 50);
        assert_eq!(
            request.vpc_security_group_ids,
            vec!["sg-bcc371c6", "sg-98dcc7fa"]
        );
        assert!(!request.publicly_accessible);
        assert!(!request.multi_az);
        assert_eq!(request.tags[0].value, "cms-performance");
    }

    #[test]
    fn test_task_request_shape() {
        let request = replication_task_request(
            crate::utils::config::DEFAULT_TASK_PREFIX,
            "arn:src",
            "arn:dst",
            "arn:rep",
            "prod",
            &payload(),
            None,
        )
        .unwrap();

        assert_eq!(request.identifier, "cms-performance-tbl-auto-consortium-prod");
        assert_eq!(request.migration_type, MigrationType::FullLoad);
        assert_eq!(request.source_endpoint_arn, "arn:src");
        assert_eq!(request.target_endpoint_arn, "arn:dst");
        assert_eq!(request.replication_instance_arn, "arn:rep");
        assert_eq!(request.tags[0].value, "cms-prod-task");
        assert!(request.cdc_start_time.is_none());

        let mappings: Value = serde_json::from_str(&request.table_mappings).unwrap();
        assert_eq!(mappings, serde_json::to_value(TableMappings::consortium()).unwrap());
        let settings: Value = serde_json::from_str(&request.settings).unwrap();
        assert_eq!(settings, json!({ "Logging": { "EnableLogging": true } }));
    }

    #[test]
    fn test_task_request_carries_cdc_start_time() {
        let cdc = "2023-06-01T08:30:00.500Z".parse::<DateTime<Utc>>().unwrap();
        let request = replication_task_request(
            crate::utils::config::DEFAULT_TASK_PREFIX,
            "arn:src",
            "arn:dst",
            "arn:rep",
            "stage",
            &payload(),
            Some(cdc),
        )
        .unwrap();

        assert_eq!(request.identifier, "cms-performance-tbl-auto-consortium-stage");
        assert_eq!(request.cdc_start_time, Some(cdc));
    }

    #[test]
    fn test_task_request_alternate_prefix() {
        let request = replication_task_request(
            "cms-master-tbl-auto-consortium",
            "a",
            "b",
            "c",
            "dev",
            &payload(),
            None,
        )
        .unwrap();
        assert_eq!(request.identifier, "cms-master-tbl-auto-consortium-dev");
    }

    #[tokio::test]
    async fn test_create_endpoint_single_call() {
        let mut dms = MockMigrationService::new();
        dms.expect_create_endpoint()
            .withf(|req| {
                req.identifier == "cms-dev-x-target" && req.endpoint_type == EndpointType::Target
            })
            .times(1)
            .returning(|req| {
                Ok(EndpointSummary {
                    arn: Some("arn:aws:dms:us-west-2:1:endpoint:T".to_string()),
                    identifier: Some(req.identifier.clone()),
                    ..Default::default()
                })
            });

        let summary = create_endpoint(&dms, "cms-dev-x", EndpointType::Target, "h", "p")
            .await
            .unwrap();
        assert_eq!(summary.identifier.as_deref(), Some("cms-dev-x-target"));
    }

    #[tokio::test]
    async fn test_remote_failure_propagates_unchanged() {
        let mut dms = MockMigrationService::new();
        dms.expect_create_replication_task().times(1).returning(|_| {
            Err(RunbookError::remote(
                "dms",
                "CreateReplicationTask",
                "ResourceAlreadyExistsFault: task already exists",
            ))
        });

        let err = create_replication_task(&dms, "p", "a", "b", "c", "dev", &payload(), None)
            .await
            .unwrap_err();

        match err {
            RunbookError::Remote {
                service,
                operation,
                message,
            } => {
                assert_eq!(service, "dms");
                assert_eq!(operation, "CreateReplicationTask");
                assert_eq!(message, "ResourceAlreadyExistsFault: task already exists");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_task_forwards_start_type() {
        let cdc = "2023-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut dms = MockMigrationService::new();
        dms.expect_start_replication_task()
            .withf(move |req| {
                req.task_arn == "arn:task"
                    && req.start_type == StartType::ReloadTarget
                    && req.cdc_start_time == Some(cdc)
            })
            .times(1)
            .returning(|_| {
                Ok(TaskSummary {
                    status: Some("starting".to_string()),
                    ..Default::default()
                })
            });

        let summary = start_replication_task(&dms, "arn:task", StartType::ReloadTarget, Some(cdc))
            .await
            .unwrap();
        assert_eq!(summary.status.as_deref(), Some("starting"));
    }

    #[tokio::test]
    async fn test_stop_failure_not_retried() {
        let mut dms = MockMigrationService::new();
        dms.expect_stop_replication_task().times(1).returning(|_| {
            Err(RunbookError::remote(
                "dms",
                "StopReplicationTask",
                "InvalidResourceStateFault",
            ))
        });

        let err = stop_replication_task(&dms, "arn:task").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "dms StopReplicationTask failed: InvalidResourceStateFault"
        );
    }

    #[test]
    fn test_start_type_names() {
        assert_eq!(StartType::StartReplication.as_str(), "start-replication");
        assert_eq!(StartType::ResumeProcessing.as_str(), "resume-processing");
        assert_eq!(StartType::ReloadTarget.as_str(), "reload-target");
        assert_eq!(
            serde_json::to_value(StartType::ReloadTarget).unwrap(),
            "reload-target"
        );
    }
}
