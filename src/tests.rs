#[cfg(test)]
mod integration_tests {
    use crate::credentials::{get_parameter, SsmParameterStore};
    use crate::dms::{admin, DmsClient};
    use crate::utils::{load_sdk_config, Config};

    #[tokio::test]
    #[ignore] // Run mit: cargo test -- --ignored --nocapture
    async fn test_describe_endpoints_live() {
        let config = Config::default();
        let sdk_config = load_sdk_config(&config.aws_region, None).await;
        let dms = DmsClient::new(&sdk_config);

        match admin::describe_endpoints(&dms).await {
            Ok(endpoints) => {
                println!("✓ DMS connection successful");
                for endpoint in &endpoints {
                    println!("  {:?} {:?}", endpoint.identifier, endpoint.status);
                }
            }
            Err(e) => {
                println!("✗ DMS connection failed: {}", e);
                panic!("DMS describe_endpoints failed");
            }
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_parameter_store_live() {
        let config = Config::default();
        let sdk_config = load_sdk_config(&config.aws_region, None).await;
        let store = SsmParameterStore::new(&sdk_config);
        let env = config.environment("dev");

        match get_parameter(&store, &env.host_parameter, true).await {
            Ok(host) => {
                println!("✓ SSM lookup successful");
                assert!(!host.is_empty());
            }
            Err(e) => {
                println!("✗ SSM lookup failed: {}", e);
                println!("Make sure AWS credentials are set and {} exists", env.host_parameter);
            }
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use crate::dms::StartType;
    use crate::mapping::TaskPayload;
    use crate::utils::Config;
    use crate::{Cli, Command};
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_start_task_defaults() {
        let cli = Cli::try_parse_from([
            "dms-runbook",
            "start-task",
            "--arn",
            "arn:aws:dms:us-west-2:1:task:X",
        ])
        .unwrap();

        assert!(!cli.assume_role);
        match cli.command {
            Command::StartTask {
                arn,
                env,
                start_type,
                cdc_start_time,
            } => {
                assert_eq!(arn.as_deref(), Some("arn:aws:dms:us-west-2:1:task:X"));
                assert!(env.is_none());
                assert_eq!(start_type, StartType::StartReplication);
                assert!(cdc_start_time.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_reload_target_with_assumed_role() {
        let cli = Cli::try_parse_from([
            "dms-runbook",
            "--assume-role",
            "start-task",
            "--env",
            "dev",
            "--start-type",
            "reload-target",
            "--cdc-start-time",
            "2018-03-08T12:12:12Z",
        ])
        .unwrap();

        assert!(cli.assume_role);
        match cli.command {
            Command::StartTask {
                start_type,
                cdc_start_time,
                ..
            } => {
                assert_eq!(start_type, StartType::ReloadTarget);
                assert_eq!(cdc_start_time.unwrap().to_rfc3339(), "2018-03-08T12:12:12+00:00");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_start_task_requires_arn_or_env() {
        assert!(Cli::try_parse_from(["dms-runbook", "start-task"]).is_err());
        assert!(Cli::try_parse_from(["dms-runbook", "create-tasks"]).is_err());
    }

    #[test]
    fn test_create_tasks_multiple_envs() {
        let cli = Cli::try_parse_from([
            "dms-runbook",
            "create-tasks",
            "--env",
            "dev",
            "--env",
            "stage",
            "--env",
            "prod",
        ])
        .unwrap();

        match cli.command {
            Command::CreateTasks { envs, .. } => assert_eq!(envs, vec!["dev", "stage", "prod"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_payload_load_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("dms_settings.json");
        let mut file = std::fs::File::create(&settings_path).unwrap();
        write!(file, r#"{{"FullLoadSettings":{{"TargetTablePrepMode":"DO_NOTHING"}}}}"#).unwrap();

        let config = Config {
            settings_file: settings_path,
            ..Config::default()
        };

        let payload = TaskPayload::load(&config).unwrap();
        assert_eq!(payload.table_mappings.rule_count(), 3);
        assert_eq!(
            payload.settings.as_value()["FullLoadSettings"]["TargetTablePrepMode"],
            "DO_NOTHING"
        );
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = Config::load(std::path::Path::new("/nonexistent/runbook.toml")).unwrap();
        assert_eq!(config.instance.identifier, "cmsperformance");
        assert!(config.assume_role.is_none());
    }
}
