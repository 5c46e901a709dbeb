use super::CONFIG_FILE_NAME;
use crate::error::{ReportgenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// reportgen.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Shared location holding the authoritative options catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    #[serde(default = "default_options_file")]
    pub options_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            options_file: default_options_file(),
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from("//localhost/SharedStorage")
}

fn default_options_file() -> String {
    "options.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Relative to `server.base_path`
    #[serde(default = "default_templates_folder")]
    pub folder: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            folder: default_templates_folder(),
        }
    }
}

fn default_templates_folder() -> String {
    "templates/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local copy of the catalog, relative to the working directory
    #[serde(default = "default_local_backup")]
    pub local_backup: PathBuf,
    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_retry")]
    pub retry: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_backup: default_local_backup(),
            remote_timeout_ms: default_remote_timeout_ms(),
            startup_delay_ms: default_startup_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            retry: default_retry(),
        }
    }
}

impl SyncConfig {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_local_backup() -> PathBuf {
    PathBuf::from("local_backup_options.json")
}

fn default_remote_timeout_ms() -> u64 {
    3000
}

fn default_startup_delay_ms() -> u64 {
    500
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_retry() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// chrono format string for date-typed fields
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl AppConfig {
    /// Read a reportgen.toml file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportgenError::ConfigParseError(format!("{}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ReportgenError::ConfigParseError(format!("{}: {}", path.display(), e)))
    }

    /// Write a reportgen.toml file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReportgenError::ConfigParseError(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Locate and load the configuration
    ///
    /// Lookup order: `explicit`, `reportgen.toml` in `cwd`, the user config
    /// directory, then built-in defaults. Returns the file that was used, if
    /// any. A file that exists but fails to parse is an error.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        let candidates = [
            Some(cwd.join(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("reportgen").join("config.toml")),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                log::debug!("Using config {}", candidate.display());
                return Ok((Self::from_file(&candidate)?, Some(candidate)));
            }
        }

        log::debug!("No config file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Path of the authoritative catalog on the shared location
    pub fn remote_catalog_path(&self) -> PathBuf {
        self.server.base_path.join(&self.server.options_file)
    }

    /// Directory holding shared templates
    pub fn templates_dir(&self) -> PathBuf {
        self.server.base_path.join(&self.templates.folder)
    }
}
