//! Lock error types

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    /// Another holder kept the lock past the caller's deadline
    #[error("{description}: lock {} still held by another client", .path.display())]
    Timeout { path: PathBuf, description: String },

    #[error("cannot {operation} {}: {source}", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    },
}

impl LockError {
    pub(crate) fn io(source: std::io::Error, path: &Path, operation: &'static str) -> Self {
        LockError::Io {
            source,
            path: path.to_path_buf(),
            operation,
        }
    }
}
