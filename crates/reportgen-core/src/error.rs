use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportgenError {
    // Template errors
    #[error("TEMPLATE_NOT_FOUND: template '{path}' does not exist")]
    TemplateNotFound { path: PathBuf },

    #[error("TEMPLATE_READ_ERROR: failed to read template '{path}': {reason}")]
    TemplateReadError { path: PathBuf, reason: String },

    // Profile errors
    #[error("PROFILE_NOT_FOUND: profile '{0}' does not exist")]
    ProfileNotFound(PathBuf),

    #[error("PROFILE_INVALID: failed to parse profile '{path}': {reason}")]
    ProfileInvalid { path: PathBuf, reason: String },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // Catalog errors
    #[error("CATALOG_READ_ERROR: {0}")]
    CatalogReadError(String),

    #[error("CATALOG_WRITE_ERROR: {0}")]
    CatalogWriteError(String),

    #[error("CATALOG_INVALID: {0}")]
    CatalogInvalid(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for ReportgenError {
    fn from(err: serde_json::Error) -> Self {
        ReportgenError::Generic(format!("JSON error: {}", err))
    }
}

impl From<crate::template::error::TemplateError> for ReportgenError {
    fn from(err: crate::template::error::TemplateError) -> Self {
        use crate::template::error::TemplateError;
        match err {
            TemplateError::NotFound { path } => ReportgenError::TemplateNotFound { path },
            TemplateError::Io { path, source } => ReportgenError::TemplateReadError {
                path,
                reason: source.to_string(),
            },
        }
    }
}

impl From<crate::sync::SyncError> for ReportgenError {
    fn from(err: crate::sync::SyncError) -> Self {
        ReportgenError::CatalogReadError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportgenError>;
