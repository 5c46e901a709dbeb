//! Remote/local fallback ladder for the options catalog

use super::{CatalogSource, FileSource, SyncError};
use crate::config::{AppConfig, SyncConfig};
use crate::options::OptionsCatalog;
use chrono::{DateTime, Utc};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Timing knobs for remote synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Upper bound on a single remote read
    pub remote_timeout: Duration,
    /// Pause before the first background attempt
    pub startup_delay: Duration,
    /// Pause before the single retry
    pub retry_delay: Duration,
    pub retry: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for SyncSettings {
    fn from(config: &SyncConfig) -> Self {
        Self {
            remote_timeout: config.remote_timeout(),
            startup_delay: config.startup_delay(),
            retry_delay: config.retry_delay(),
            retry: config.retry,
        }
    }
}

/// Result of reading the local backup at startup
#[derive(Debug)]
pub enum LocalLoad {
    /// Backup parsed; `modified` is its last-modified time
    Adopted {
        catalog: OptionsCatalog,
        modified: Option<DateTime<Utc>>,
    },
    /// No backup on disk
    Missing,
    /// Backup present but unreadable or not a catalog object
    Unusable(SyncError),
}

/// Outcome of flushing the catalog to both copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    pub local: Result<(), SyncError>,
    pub remote: Result<(), SyncError>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.local.is_ok() && self.remote.is_ok()
    }
}

/// Decides which copy of the catalog to trust and keeps both copies written
pub struct SyncPolicy {
    local: Arc<dyn CatalogSource>,
    remote: Arc<dyn CatalogSource>,
    settings: SyncSettings,
}

impl SyncPolicy {
    pub fn new(
        local: Arc<dyn CatalogSource>,
        remote: Arc<dyn CatalogSource>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            local,
            remote,
            settings,
        }
    }

    /// File-backed policy using the configured backup and shared catalog paths
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(FileSource::local(&config.sync.local_backup)),
            Arc::new(FileSource::remote(config.remote_catalog_path())),
            SyncSettings::from(&config.sync),
        )
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Read the local backup
    pub fn load_local(&self) -> LocalLoad {
        let text = match self.local.read() {
            Ok(Some(text)) => text,
            Ok(None) => return LocalLoad::Missing,
            Err(e) => return LocalLoad::Unusable(e),
        };

        match parse_catalog(&text, self.local.as_ref()) {
            Ok(catalog) => LocalLoad::Adopted {
                catalog,
                modified: self.local.modified(),
            },
            Err(e) => LocalLoad::Unusable(e),
        }
    }

    /// Fetch and validate the remote copy, bounded by `remote_timeout`
    pub fn fetch_remote(&self) -> Result<OptionsCatalog, SyncError> {
        log::debug!("Fetching catalog from {}", self.remote.describe());
        match run_bounded(&self.remote, self.settings.remote_timeout, |s| s.read())? {
            Some(text) => parse_catalog(&text, self.remote.as_ref()),
            None => Err(SyncError::Absent {
                source_name: self.remote.describe(),
            }),
        }
    }

    /// Overwrite the local backup
    pub fn write_backup(&self, catalog: &OptionsCatalog) -> Result<(), SyncError> {
        let content = serialize(catalog, self.local.as_ref())?;
        self.local.write(&content)
    }

    /// Write the catalog to the local backup, then to the remote copy
    ///
    /// The remote write is bounded by `remote_timeout` like the remote read.
    pub fn persist(&self, catalog: &OptionsCatalog) -> PersistReport {
        let content = match serialize(catalog, self.local.as_ref()) {
            Ok(content) => content,
            Err(e) => {
                return PersistReport {
                    local: Err(e.clone()),
                    remote: Err(e),
                }
            }
        };

        let local = self.local.write(&content);
        let remote = run_bounded(&self.remote, self.settings.remote_timeout, move |s| {
            s.write(&content)
        });
        let report = PersistReport { local, remote };

        if let Err(e) = &report.local {
            log::warn!("Failed to write local backup: {}", e);
        }
        if let Err(e) = &report.remote {
            log::warn!("Failed to write shared catalog: {}", e);
        }
        report
    }
}

fn parse_catalog(text: &str, source: &dyn CatalogSource) -> Result<OptionsCatalog, SyncError> {
    OptionsCatalog::from_json(text).map_err(|e| SyncError::Malformed {
        source_name: source.describe(),
        reason: e.to_string(),
    })
}

fn serialize(catalog: &OptionsCatalog, source: &dyn CatalogSource) -> Result<String, SyncError> {
    catalog.to_json_pretty().map_err(|e| SyncError::Write {
        source_name: source.describe(),
        reason: e.to_string(),
    })
}

/// Run `op` against `source` on a helper thread, giving up after `timeout`
///
/// An operation that never returns leaves its helper thread parked; the
/// caller is released either way.
fn run_bounded<T, F>(
    source: &Arc<dyn CatalogSource>,
    timeout: Duration,
    op: F,
) -> Result<T, SyncError>
where
    T: Send + 'static,
    F: FnOnce(&dyn CatalogSource) -> Result<T, SyncError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(source);

    thread::Builder::new()
        .name("catalog-io".to_string())
        .spawn(move || {
            // Receiver may be gone after a timeout
            let _ = tx.send(op(worker.as_ref()));
        })
        .map_err(|e| SyncError::Unreachable {
            source_name: source.describe(),
            reason: e.to_string(),
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(SyncError::Timeout {
            source_name: source.describe(),
            timeout,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(SyncError::Unreachable {
            source_name: source.describe(),
            reason: "catalog I/O stopped without an answer".to_string(),
        }),
    }
}
