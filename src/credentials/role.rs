use crate::error::{Result, RunbookError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client;
use serde::Serialize;
use std::fmt;
use std::time::SystemTime;

/// Temporäre Credentials aus AssumeRole
#[derive(Clone, PartialEq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<SystemTime>,
}

impl TemporaryCredentials {
    /// Konvertiere zu SDK Credentials für einen neuen Client
    pub fn into_provider(self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id,
            self.secret_access_key,
            Some(self.session_token),
            self.expiration,
            "sts-assume-role",
        )
    }

    /// Ausgabe ohne Secrets
    pub fn summary(&self, role_arn: &str, session_name: &str) -> AssumedRoleSummary {
        AssumedRoleSummary {
            role_arn: role_arn.to_string(),
            session_name: session_name.to_string(),
            access_key_id: self.access_key_id.clone(),
            expiration: self
                .expiration
                .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339()),
        }
    }
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct AssumedRoleSummary {
    pub role_arn: String,
    pub session_name: String,
    pub access_key_id: String,
    pub expiration: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<TemporaryCredentials>;
}

/// STS Client für Cross-Account Zugriff
pub struct StsRoleAssumer {
    client: Client,
}

impl StsRoleAssumer {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials> {
        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| {
                RunbookError::remote("sts", "AssumeRole", DisplayErrorContext(&e).to_string())
            })?;

        let credentials = response.credentials().ok_or(RunbookError::MissingField {
            service: "sts",
            operation: "AssumeRole",
            field: "Credentials",
        })?;

        Ok(TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: SystemTime::try_from(*credentials.expiration()).ok(),
        })
    }
}

/// Rolle wechseln; Fehler werden nicht wiederholt
pub async fn assume_role(
    assumer: &dyn RoleAssumer,
    role_arn: &str,
    session_name: &str,
) -> Result<TemporaryCredentials> {
    let credentials = assumer.assume_role(role_arn, session_name).await?;

    tracing::info!(
        role_arn,
        session_name,
        access_key_id = %credentials.access_key_id,
        "Role assumed"
    );

    Ok(credentials)
}
