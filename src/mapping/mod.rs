pub mod rules;
pub mod settings;

use crate::error::Result;
use crate::utils::Config;

pub use rules::TableMappings;
pub use settings::TaskSettings;

/// Statischer Teil eines Task Requests: Mappings + Settings
#[derive(Debug, Clone)]
pub struct TaskPayload {
    pub table_mappings: TableMappings,
    pub settings: TaskSettings,
}

impl TaskPayload {
    /// Einmal beim Start laden
    pub fn load(config: &Config) -> Result<Self> {
        let table_mappings = match &config.table_mappings_file {
            Some(path) => TableMappings::load(path)?,
            None => TableMappings::consortium(),
        };
        let settings = TaskSettings::load(&config.settings_file)?;

        tracing::info!(
            mapping_rules = table_mappings.rule_count(),
            settings_sections = settings.section_count(),
            "Task payload loaded"
        );

        Ok(Self {
            table_mappings,
            settings,
        })
    }
}
