//! Einmaliges Migrations-Runbook: Endpoints und Tasks pro Environment anlegen.
//!
//! Kein Idempotenz-Check: ein zweiter Lauf mit denselben Identifiern scheitert
//! bei DMS mit einem Duplicate-Fehler. Bereits angelegte Ressourcen werden
//! bei einem Fehler nicht zurückgerollt.

use crate::credentials::{get_parameter, ParameterStore};
use crate::dms::{admin, EndpointSummary, EndpointType, MigrationService, TaskSummary};
use crate::error::{Result, RunbookError};
use crate::mapping::TaskPayload;
use crate::utils::{Config, Environment};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

pub struct Runbook {
    config: Config,
    dms: Arc<dyn MigrationService>,
    parameters: Arc<dyn ParameterStore>,
}

impl Runbook {
    pub fn new(
        config: Config,
        dms: Arc<dyn MigrationService>,
        parameters: Arc<dyn ParameterStore>,
    ) -> Self {
        Self {
            config,
            dms,
            parameters,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dms(&self) -> &dyn MigrationService {
        self.dms.as_ref()
    }

    /// Host + Passwort aus SSM, dann Source und Target Endpoint anlegen
    pub async fn create_endpoints(&self, env_name: &str) -> Result<Vec<EndpointSummary>> {
        let env = self.config.environment(env_name);

        let parameters = self.parameters.as_ref();
        let password = get_parameter(parameters, &env.password_parameter, true).await?;
        let host = get_parameter(parameters, &env.host_parameter, true).await?;

        tracing::info!(
            env = env_name,
            endpoint = %env.endpoint_name,
            host = %host,
            "Creating endpoints"
        );

        let mut created = Vec::with_capacity(2);
        for endpoint_type in [EndpointType::Source, EndpointType::Target] {
            let summary = admin::create_endpoint(
                self.dms(),
                &env.endpoint_name,
                endpoint_type,
                &host,
                &password,
            )
            .await?;
            print_response(&summary)?;
            created.push(summary);
        }

        Ok(created)
    }

    /// Ein Full-Load Task pro Environment, in der angegebenen Reihenfolge
    pub async fn create_tasks(
        &self,
        env_names: &[String],
        payload: &TaskPayload,
        cdc_start_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<TaskSummary>> {
        let mut created = Vec::with_capacity(env_names.len());

        for env_name in env_names {
            let env = self.config.environment(env_name);
            let source = required(
                &env,
                env.source_endpoint_arn.as_deref(),
                "source_endpoint_arn",
            )?;
            let target = required(
                &env,
                env.target_endpoint_arn.as_deref(),
                "target_endpoint_arn",
            )?;
            let instance = required(
                &env,
                env.replication_instance_arn.as_deref(),
                "replication_instance_arn",
            )?;

            let summary = admin::create_replication_task(
                self.dms(),
                &self.config.task_identifier_prefix,
                source,
                target,
                instance,
                env_name,
                payload,
                cdc_start_time,
            )
            .await?;
            print_response(&summary)?;
            created.push(summary);
        }

        Ok(created)
    }

    /// ARN explizit oder `task_arn` des Environments
    pub fn task_arn(&self, arn: Option<&str>, env_name: Option<&str>) -> Result<String> {
        if let Some(arn) = arn {
            return Ok(arn.to_string());
        }

        let env_name = env_name.unwrap_or_default();
        let env = self.config.environment(env_name);
        required(&env, env.task_arn.as_deref(), "task_arn").map(str::to_string)
    }

    /// Instance ARN explizit oder aus `[instance]`
    pub fn instance_arn(&self, arn: Option<&str>) -> Result<String> {
        arn.map(str::to_string)
            .or_else(|| self.config.instance.arn.clone())
            .ok_or(RunbookError::MissingArn {
                environment: "instance".to_string(),
                field: "arn",
            })
    }
}

fn required<'a>(env: &Environment, value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    value.ok_or_else(|| RunbookError::MissingArn {
        environment: env.name.clone(),
        field,
    })
}

/// Jede Response landet als JSON auf stdout
pub fn print_response<T: Serialize>(response: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
