//! Template documents loaded from disk or built in memory

use crate::template::error::TemplateError;
use std::path::{Path, PathBuf};

/// An immutable template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    source: String,
    path: Option<PathBuf>,
}

impl TemplateDocument {
    /// Wrap an in-memory template string
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    /// Read a template file
    ///
    /// A missing file is reported as [`TemplateError::NotFound`] so callers can
    /// tell it apart from other read failures. Neither case yields a blank
    /// document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TemplateError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                TemplateError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        log::debug!("Loaded template {} ({} bytes)", path.display(), source.len());
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Path the template was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
