use crate::error::{Result, RunbookError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;

/// Key-Value Parameter Store (SSM) Abstraktion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Hole einen einzelnen Wert, optional entschlüsselt (SecureString)
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String>;
}

/// SSM Parameter Store
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String> {
        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|e| {
                RunbookError::remote("ssm", "GetParameter", DisplayErrorContext(&e).to_string())
            })?;

        response
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or(RunbookError::MissingField {
                service: "ssm",
                operation: "GetParameter",
                field: "Parameter.Value",
            })
    }
}

/// Parameter lesen. Der Wert selbst wird nie geloggt.
pub async fn get_parameter(
    store: &dyn ParameterStore,
    name: &str,
    with_decryption: bool,
) -> Result<String> {
    tracing::debug!(parameter = name, with_decryption, "Resolving parameter");
    store.get_parameter(name, with_decryption).await
}
