//! Application configuration (`reportgen.toml`)

mod model;

pub use model::{AppConfig, ReportConfig, ServerConfig, SyncConfig, TemplatesConfig};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "reportgen.toml";
