use std::path::PathBuf;

/// Fehler des Runbooks. Remote-Fehler werden unverändert durchgereicht.
#[derive(Debug, thiserror::Error)]
pub enum RunbookError {
    #[error("{service} {operation} failed: {message}")]
    Remote {
        service: &'static str,
        operation: &'static str,
        message: String,
    },

    #[error("{service} {operation} returned no {field}")]
    MissingField {
        service: &'static str,
        operation: &'static str,
        field: &'static str,
    },

    #[error("failed to read {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("environment '{environment}' has no {field} configured")]
    MissingArn {
        environment: String,
        field: &'static str,
    },

    #[error("--assume-role given but no [assume_role] section is configured")]
    MissingRole,
}

impl RunbookError {
    /// Wrap an SDK error with its full context chain.
    pub fn remote(
        service: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        RunbookError::Remote {
            service,
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunbookError>;
