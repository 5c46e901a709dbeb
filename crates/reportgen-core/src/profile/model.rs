use crate::error::{ReportgenError, Result};
use crate::template::FieldValues;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub profile_name: Option<String>,
    pub template_path: String,
    #[serde(default)]
    pub simple_fields: Vec<FieldConfig>,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub tag: String,
    #[serde(default)]
    pub label: String,
    /// Input kind understood by the host (`TEXT`, `DATE`, ...)
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_if: Option<EnabledIf>,
}

/// Enables a column only while another column of the same row holds one of
/// `values`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledIf {
    pub tag: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<FieldConfig>,
}

impl Profile {
    /// Read a profile JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportgenError::ProfileNotFound(path.to_path_buf())
            } else {
                ReportgenError::IoError(e)
            }
        })?;

        serde_json::from_str(&content).map_err(|e| ReportgenError::ProfileInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Display name; falls back to a placeholder for unnamed profiles
    pub fn display_name(&self) -> &str {
        self.profile_name.as_deref().unwrap_or("<Unnamed Profile>")
    }

    /// `templatePath` resolved against the directory of the profile file
    pub fn template_file(&self, profile_path: &Path) -> PathBuf {
        let base = profile_path.parent().unwrap_or_else(|| Path::new(""));
        base.join(&self.template_path)
    }

    pub fn table(&self, name: &str) -> Option<&TableConfig> {
        self.tables
            .iter()
            .find(|t| t.table_name.eq_ignore_ascii_case(name))
    }
}

impl FieldConfig {
    /// Whether this field accepts input given the other values of its row
    ///
    /// A missing controlling value counts as the empty string.
    pub fn is_enabled(&self, row: &FieldValues) -> bool {
        match &self.enabled_if {
            None => true,
            Some(condition) => {
                let actual = row.get(&condition.tag).unwrap_or("");
                condition.values.iter().any(|allowed| allowed == actual)
            }
        }
    }
}
