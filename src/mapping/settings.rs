use crate::error::{Result, RunbookError};
use serde_json::Value;
use std::path::Path;

/// ReplicationTaskSettings aus dms_settings.json, wird nicht verändert
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSettings(Value);

impl TaskSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RunbookError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        let value = serde_json::from_str(&raw).map_err(|source| RunbookError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self(value);
        tracing::debug!(
            path = %path.display(),
            sections = settings.section_count(),
            "Task settings loaded"
        );

        Ok(settings)
    }

    #[cfg(test)]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Anzahl der Top-Level Sections (TargetMetadata, FullLoadSettings, ...)
    pub fn section_count(&self) -> usize {
        self.as_value().as_object().map_or(0, |sections| sections.len())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
