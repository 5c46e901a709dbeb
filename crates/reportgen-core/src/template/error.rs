//! Template error types

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading a template.
///
/// Rendering itself never fails: missing tags and empty row sets degrade to
/// no-ops. Only the I/O around obtaining the template text is fallible.
#[derive(Debug)]
pub enum TemplateError {
    /// Template file does not exist
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Template file exists but could not be read
    Io {
        /// Path that was read
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NotFound { path } => {
                write!(f, "Template not found: {}", path.display())
            }
            TemplateError::Io { path, source } => {
                write!(f, "Failed to read template {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::NotFound { .. } => None,
            TemplateError::Io { source, .. } => Some(source),
        }
    }
}
