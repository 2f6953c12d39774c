use crate::error::{Result, RunbookError};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// DMS Table Mappings, wird unverändert als JSON an DMS übergeben
///
/// Eingebaute Regeln sind typisiert. Eine geladene Datei bleibt rohes JSON,
/// damit Felder und Actions, die hier nicht modelliert sind, erhalten bleiben.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TableMappings {
    Rules(RuleSet),
    Raw(Value),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<MappingRule>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "rule-type", rename_all = "kebab-case")]
pub enum MappingRule {
    Transformation(TransformationRule),
    Selection(SelectionRule),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TransformationRule {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_target: RuleTarget,
    pub object_locator: ObjectLocator,
    pub rule_action: RuleAction,
    pub value: String,
    pub old_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SelectionRule {
    pub rule_id: String,
    pub rule_name: String,
    pub object_locator: ObjectLocator,
    pub rule_action: RuleAction,
    pub filters: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectLocator {
    pub schema_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleTarget {
    Schema,
    Table,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAction {
    Rename,
    Include,
}

const SOURCE_SCHEMA: &str = "master_db_auto";
const SOURCE_TABLE: &str = "tbl_auto_consortium";

impl TableMappings {
    /// master_db_auto.tbl_auto_consortium → casemanager.afm_tbl_auto_consortium_cms
    pub fn consortium() -> Self {
        TableMappings::Rules(RuleSet {
            rules: vec![
                MappingRule::Transformation(TransformationRule {
                    rule_id: "109398514".to_string(),
                    rule_name: "109398514".to_string(),
                    rule_target: RuleTarget::Table,
                    object_locator: ObjectLocator {
                        schema_name: SOURCE_SCHEMA.to_string(),
                        table_name: Some(SOURCE_TABLE.to_string()),
                    },
                    rule_action: RuleAction::Rename,
                    value: "afm_tbl_auto_consortium_cms".to_string(),
                    old_value: None,
                }),
                MappingRule::Transformation(TransformationRule {
                    rule_id: "109257422".to_string(),
                    rule_name: "109257422".to_string(),
                    rule_target: RuleTarget::Schema,
                    object_locator: ObjectLocator {
                        schema_name: SOURCE_SCHEMA.to_string(),
                        table_name: None,
                    },
                    rule_action: RuleAction::Rename,
                    value: "casemanager".to_string(),
                    old_value: None,
                }),
                MappingRule::Selection(SelectionRule {
                    rule_id: "109130893".to_string(),
                    rule_name: "109130893".to_string(),
                    object_locator: ObjectLocator {
                        schema_name: SOURCE_SCHEMA.to_string(),
                        table_name: Some(SOURCE_TABLE.to_string()),
                    },
                    rule_action: RuleAction::Include,
                    filters: Vec::new(),
                }),
            ],
        })
    }

    /// Lade Mappings aus einer JSON-Datei (z.B. aus dem DMS Wizard exportiert)
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RunbookError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        let value = serde_json::from_str(&raw).map_err(|source| RunbookError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(TableMappings::Raw(value))
    }

    pub fn rule_count(&self) -> usize {
        match self {
            TableMappings::Rules(set) => set.rules.len(),
            TableMappings::Raw(value) => value
                .get("rules")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
