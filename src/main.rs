mod credentials;
mod dms;
mod error;
mod mapping;
mod runbook;
mod utils;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::credentials::{RoleAssumer, SsmParameterStore, StsRoleAssumer};
use crate::dms::{admin, DmsClient, StartType};
use crate::error::RunbookError;
use crate::mapping::TaskPayload;
use crate::runbook::{print_response, Runbook};

/// DMS Runbook: Instance, Endpoints und Replication Tasks für die CMS Migration
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML Konfiguration (optional)
    #[arg(long, global = true, default_value = "runbook.toml")]
    config: PathBuf,

    /// DMS Calls mit der Rolle aus [assume_role] ausführen
    #[arg(long, global = true)]
    assume_role: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replication Instance anlegen
    CreateInstance {
        #[arg(long)]
        identifier: Option<String>,
    },
    DeleteInstance {
        #[arg(long)]
        arn: Option<String>,
    },
    DescribeEndpoints,
    /// Source + Target Endpoint für ein Environment anlegen
    CreateEndpoints {
        #[arg(long)]
        env: String,
    },
    DeleteEndpoint {
        #[arg(long)]
        arn: String,
    },
    /// Full-Load Tasks anlegen, z.B. --env dev --env stage --env prod
    CreateTasks {
        #[arg(long = "env", required = true)]
        envs: Vec<String>,
        #[arg(long)]
        cdc_start_time: Option<DateTime<Utc>>,
    },
    DescribeTasks,
    StartTask {
        #[arg(long, required_unless_present = "env")]
        arn: Option<String>,
        #[arg(long)]
        env: Option<String>,
        #[arg(long, value_enum, default_value_t = StartType::StartReplication)]
        start_type: StartType,
        #[arg(long)]
        cdc_start_time: Option<DateTime<Utc>>,
    },
    StopTask {
        #[arg(long, required_unless_present = "env")]
        arn: Option<String>,
        #[arg(long)]
        env: Option<String>,
    },
    DeleteTask {
        #[arg(long, required_unless_present = "env")]
        arn: Option<String>,
        #[arg(long)]
        env: Option<String>,
    },
    /// Nur die Rolle annehmen und die Session ausgeben (ohne Secrets)
    AssumeRole,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = utils::Config::load(&cli.config)?;

    // Initialize logging
    let _log_guard = utils::init_logging(config.log_dir.as_deref());

    tracing::info!(
        region = %config.aws_region,
        command = ?cli.command,
        "Starting DMS runbook"
    );

    let base_config = utils::load_sdk_config(&config.aws_region, None).await;

    let dms_config = if cli.assume_role || matches!(cli.command, Command::AssumeRole) {
        let role = config.assume_role.as_ref().ok_or(RunbookError::MissingRole)?;
        let session_name = role.session_name();
        let assumer = StsRoleAssumer::new(&base_config);
        let credentials =
            credentials::assume_role(&assumer as &dyn RoleAssumer, &role.role_arn, &session_name)
                .await?;

        if let Command::AssumeRole = cli.command {
            print_response(&credentials.summary(&role.role_arn, &session_name))?;
            return Ok(());
        }

        utils::load_sdk_config(&config.aws_region, Some(credentials)).await
    } else {
        base_config.clone()
    };

    // SSM bleibt in der Basis-Identität, nur DMS läuft ggf. über die Rolle
    let runbook = Runbook::new(
        config,
        Arc::new(DmsClient::new(&dms_config)),
        Arc::new(SsmParameterStore::new(&base_config)),
    );

    run(&runbook, cli.command).await?;

    Ok(())
}

async fn run(runbook: &Runbook, command: Command) -> error::Result<()> {
    let config = runbook.config();
    let dms = runbook.dms();

    match command {
        Command::CreateInstance { identifier } => {
            let identifier = identifier.unwrap_or_else(|| config.instance.identifier.clone());
            let summary =
                admin::create_replication_instance(dms, &identifier, &config.instance).await?;
            print_response(&summary)
        }
        Command::DeleteInstance { arn } => {
            let arn = runbook.instance_arn(arn.as_deref())?;
            print_response(&admin::delete_replication_instance(dms, &arn).await?)
        }
        Command::DescribeEndpoints => print_response(&admin::describe_endpoints(dms).await?),
        Command::CreateEndpoints { env } => runbook.create_endpoints(&env).await.map(|_| ()),
        Command::DeleteEndpoint { arn } => {
            print_response(&admin::delete_endpoint(dms, &arn).await?)
        }
        Command::CreateTasks { envs, cdc_start_time } => {
            let payload = TaskPayload::load(config)?;
            runbook.create_tasks(&envs, &payload, cdc_start_time).await.map(|_| ())
        }
        Command::DescribeTasks => print_response(&admin::describe_replication_tasks(dms).await?),
        Command::StartTask {
            arn,
            env,
            start_type,
            cdc_start_time,
        } => {
            let arn = runbook.task_arn(arn.as_deref(), env.as_deref())?;
            let summary =
                admin::start_replication_task(dms, &arn, start_type, cdc_start_time).await?;
            print_response(&summary)
        }
        Command::StopTask { arn, env } => {
            let arn = runbook.task_arn(arn.as_deref(), env.as_deref())?;
            print_response(&admin::stop_replication_task(dms, &arn).await?)
        }
        Command::DeleteTask { arn, env } => {
            let arn = runbook.task_arn(arn.as_deref(), env.as_deref())?;
            print_response(&admin::delete_replication_task(dms, &arn).await?)
        }
        // wird bereits in main behandelt
        Command::AssumeRole => Ok(()),
    }
}
