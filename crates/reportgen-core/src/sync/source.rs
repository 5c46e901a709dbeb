//! Storage locations for the options catalog

use super::SyncError;
use crate::lock::{acquire_lock, acquire_shared_lock, lock_path_for};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/// One copy of the catalog (the shared remote file or the local backup)
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;

    /// Raw catalog text, or `None` when the copy does not exist
    fn read(&self) -> Result<Option<String>, SyncError>;

    /// Replace the copy with `contents`
    fn write(&self, contents: &str) -> Result<(), SyncError>;

    /// Last modification time, if known
    fn modified(&self) -> Option<DateTime<Utc>>;
}

const WRITE_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const READ_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// A catalog stored in a JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    create_parent: bool,
}

impl FileSource {
    /// A local file; missing parent directories are created on write
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_parent: true,
        }
    }

    /// A file on a shared location; a missing parent means unreachable
    pub fn remote(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_parent: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreachable(&self, reason: impl ToString) -> SyncError {
        SyncError::Unreachable {
            source_name: self.describe(),
            reason: reason.to_string(),
        }
    }

    fn write_failed(&self, reason: impl ToString) -> SyncError {
        SyncError::Write {
            source_name: self.describe(),
            reason: reason.to_string(),
        }
    }

    fn parent(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>, SyncError> {
        if !self.create_parent && !self.parent().is_dir() {
            return Err(self.unreachable(format!("{} is not available", self.parent().display())));
        }
        if !self.path.exists() {
            return Ok(None);
        }

        // Read-only shares may refuse the lock file; read unlocked then.
        let _guard = acquire_shared_lock(
            &lock_path_for(&self.path),
            READ_LOCK_TIMEOUT,
            "catalog read",
        )
        .map_err(|e| log::debug!("Reading {} without lock: {}", self.describe(), e))
        .ok();

        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unreachable(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), SyncError> {
        let parent = self.parent();
        if self.create_parent {
            std::fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
        } else if !parent.is_dir() {
            return Err(self.unreachable(format!("{} is not available", parent.display())));
        }

        let _guard = acquire_lock(&lock_path_for(&self.path), WRITE_LOCK_TIMEOUT, "catalog write")
            .map_err(|e| self.write_failed(e))?;
        atomic_write(contents, &self.path, parent).map_err(|e| self.write_failed(e))
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        let modified = std::fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }
}

/// Write through a temp file in the same directory, then rename over `path`
fn atomic_write(content: &str, path: &Path, parent: &Path) -> std::io::Result<()> {
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    // Directory fsync makes the rename durable (unix only)
    #[cfg(unix)]
    {
        File::open(parent)?.sync_all()?;
    }

    Ok(())
}
