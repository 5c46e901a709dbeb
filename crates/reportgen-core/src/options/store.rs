use super::model::{Insertion, OptionsCatalog};
use crate::config::AppConfig;
use crate::sync::{
    CatalogOrigin, ConnectionState, LocalLoad, PersistReport, SyncOutcome, SyncPolicy, SyncStatus,
};
use chrono::{DateTime, Utc};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};

/// Result of [`OptionsStore::add_option`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Value inserted; `persist` reports the flush to both copies. The
    /// in-memory insert stands even when the flush fails.
    Added { persist: PersistReport },
    /// Value already present (case-insensitive); nothing changed
    Duplicate,
    /// Nothing changed because the input cannot be stored
    Rejected { reason: String },
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

/// Live options catalog for one application run.
///
/// Readers get immutable snapshots and never wait on catalog I/O. Writers
/// (`add_option` and a remote sync) are serialized end to end on the flush
/// lock, so neither can clobber the other's change.
pub struct OptionsStore {
    catalog: RwLock<Arc<OptionsCatalog>>,
    status: Mutex<SyncStatus>,
    observers: Mutex<Vec<Sender<SyncStatus>>>,
    policy: SyncPolicy,
    /// Serializes catalog changes together with their file I/O
    flush: Mutex<()>,
}

impl OptionsStore {
    /// Create the store and adopt the local backup, if any
    ///
    /// Never touches the remote copy; call [`OptionsStore::sync_now`] or
    /// [`OptionsStore::spawn_remote_sync`] afterwards.
    pub fn open(policy: SyncPolicy) -> Self {
        let store = Self {
            catalog: RwLock::new(Arc::new(OptionsCatalog::new())),
            status: Mutex::new(SyncStatus::initial()),
            observers: Mutex::new(Vec::new()),
            policy,
            flush: Mutex::new(()),
        };
        store.load_local();
        store
    }

    /// [`OptionsStore::open`] with file sources taken from the configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::open(SyncPolicy::from_config(config))
    }

    fn load_local(&self) {
        self.transition(|s| s.state = ConnectionState::LoadingLocal);

        match self.policy.load_local() {
            LocalLoad::Adopted { catalog, modified } => {
                log::info!("Using local catalog copy ({} fields)", catalog.len());
                *self.write_catalog() = Arc::new(catalog);
                self.transition(|s| {
                    s.state = ConnectionState::OfflineLocal;
                    s.source = CatalogOrigin::Local;
                    s.last_synced_at = modified;
                });
            }
            LocalLoad::Missing => {
                log::info!("No local catalog copy, starting empty");
                self.start_empty();
            }
            LocalLoad::Unusable(e) => {
                log::warn!("Ignoring local catalog copy: {}", e);
                self.start_empty();
            }
        }
    }

    fn start_empty(&self) {
        self.transition(|s| {
            s.state = ConnectionState::OfflineEmpty;
            s.source = CatalogOrigin::Empty;
        });
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<OptionsCatalog> {
        Arc::clone(&self.read_catalog())
    }

    /// Allowed values for `field`, sorted
    pub fn get_options(&self, field: &str, parent: Option<&str>) -> Vec<String> {
        self.read_catalog().options(field, parent)
    }

    /// The field whose value filters `field`'s options
    pub fn get_dependency_field(&self, field: &str) -> Option<String> {
        self.read_catalog().dependency(field).map(str::to_string)
    }

    /// Whether the catalog has an entry for `field`
    pub fn has_options(&self, field: &str) -> bool {
        self.read_catalog().contains(field)
    }

    /// Add `value` to `field`, then flush the catalog to both copies
    ///
    /// Runs under the flush lock, so it waits for an in-flight remote sync
    /// (at most `remote_timeout`) and lands on top of the adopted catalog.
    pub fn add_option(&self, field: &str, value: &str, parent: Option<&str>) -> AddOutcome {
        let _serial = self.lock_flush();
        let insertion = {
            let mut catalog = self.write_catalog();
            Arc::make_mut(&mut catalog).insert(field, value, parent)
        };

        match insertion {
            Insertion::Inserted => {
                log::info!("Added option '{}' to '{}'", value, field);
                let snapshot = self.snapshot();
                AddOutcome::Added {
                    persist: self.policy.persist(&snapshot),
                }
            }
            Insertion::Duplicate => AddOutcome::Duplicate,
            Insertion::Rejected(reason) => {
                log::warn!("Option '{}' for '{}' rejected: {}", value, field, reason);
                AddOutcome::Rejected { reason }
            }
        }
    }

    /// One bounded attempt to adopt the remote catalog
    ///
    /// On success the catalog is swapped wholesale, the local backup is
    /// overwritten and the state becomes `Online`. On failure the catalog is
    /// untouched and the store returns to its offline state.
    ///
    /// The flush lock is held from the remote read through the backup write,
    /// so an `add_option` either reaches the remote copy before it is read or
    /// is applied after the swap.
    pub fn sync_now(&self) -> SyncOutcome {
        let previous = self.status();
        self.transition(|s| s.state = ConnectionState::LoadingRemote);

        let serial = self.lock_flush();
        match self.policy.fetch_remote() {
            Ok(catalog) => {
                let snapshot = Arc::new(catalog);
                *self.write_catalog() = Arc::clone(&snapshot);
                let backup = self.policy.write_backup(&snapshot);
                drop(serial);

                if let Err(e) = &backup {
                    log::warn!("Catalog synced but local backup not updated: {}", e);
                }

                log::info!("Catalog synchronized ({} fields)", snapshot.len());
                self.transition(|s| {
                    s.state = ConnectionState::Online;
                    s.source = CatalogOrigin::Remote;
                    s.last_synced_at = Some(Utc::now());
                });
                SyncOutcome::Synced { backup }
            }
            Err(e) => {
                drop(serial);
                log::warn!("Catalog sync failed: {}", e);
                let fallback = match previous.source {
                    CatalogOrigin::Empty => ConnectionState::OfflineEmpty,
                    CatalogOrigin::Local | CatalogOrigin::Remote => ConnectionState::OfflineLocal,
                };
                self.transition(|s| s.state = fallback);
                SyncOutcome::Failed(e)
            }
        }
    }

    /// Startup sync: wait `startup_delay`, try once, retry once if enabled
    pub fn sync_with_retry(&self) -> SyncOutcome {
        let settings = *self.policy.settings();
        thread::sleep(settings.startup_delay);

        let outcome = self.sync_now();
        if outcome.is_synced() || !settings.retry {
            return outcome;
        }

        log::info!("Retrying catalog sync in {:?}", settings.retry_delay);
        thread::sleep(settings.retry_delay);
        self.sync_now()
    }

    /// Run [`OptionsStore::sync_with_retry`] on a background thread
    pub fn spawn_remote_sync(self: &Arc<Self>) -> std::io::Result<JoinHandle<SyncOutcome>> {
        let store = Arc::clone(self);
        thread::Builder::new()
            .name("catalog-sync".to_string())
            .spawn(move || store.sync_with_retry())
    }

    pub fn status(&self) -> SyncStatus {
        self.lock_status().clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.lock_status().state
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.lock_status().last_synced_at
    }

    /// Receive every status change from now on
    pub fn subscribe(&self) -> Receiver<SyncStatus> {
        let (tx, rx) = mpsc::channel();
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn transition(&self, change: impl FnOnce(&mut SyncStatus)) {
        let status = {
            let mut status = self.lock_status();
            change(&mut status);
            status.clone()
        };
        log::debug!("Sync state: {:?}", status.state);

        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.retain(|tx| tx.send(status.clone()).is_ok());
    }

    fn lock_flush(&self) -> MutexGuard<'_, ()> {
        self.flush.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_status(&self) -> MutexGuard<'_, SyncStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_catalog(&self) -> RwLockReadGuard<'_, Arc<OptionsCatalog>> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_catalog(&self) -> RwLockWriteGuard<'_, Arc<OptionsCatalog>> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{FileSource, SyncSettings};
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fast_settings() -> SyncSettings {
        SyncSettings {
            remote_timeout: Duration::from_secs(2),
            startup_delay: Duration::ZERO,
            retry_delay: Duration::from_millis(10),
            retry: true,
        }
    }

    fn file_store(root: &Path) -> OptionsStore {
        std::fs::create_dir_all(root.join("share")).unwrap();
        OptionsStore::open(SyncPolicy::new(
            Arc::new(FileSource::local(root.join("backup.json"))),
            Arc::new(FileSource::remote(root.join("share/options.json"))),
            fast_settings(),
        ))
    }

    #[test]
    fn test_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = file_store(temp.path());

        assert_eq!(store.connection_state(), ConnectionState::OfflineEmpty);
        assert!(store.snapshot().is_empty());
        assert!(!store.has_options("size"));
        assert!(store.get_options("size", None).is_empty());
        assert_eq!(store.get_dependency_field("size"), None);
    }

    #[test]
    fn test_add_option_is_case_insensitive_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = file_store(temp.path());

        assert!(store.add_option("size", "M", None).is_added());
        assert_eq!(store.add_option("size", "M", None), AddOutcome::Duplicate);
        assert_eq!(store.add_option("size", "m", None), AddOutcome::Duplicate);
        assert_eq!(store.get_options("size", None), vec!["M"]);
        assert!(store.has_options("size"));
    }

    #[test]
    fn test_add_option_flushes_both_copies() {
        let temp = TempDir::new().unwrap();
        let store = file_store(temp.path());

        match store.add_option("size", "XL", None) {
            AddOutcome::Added { persist } => assert!(persist.is_complete()),
            other => panic!("Expected Added, got {:?}", other),
        }

        for path in ["backup.json", "share/options.json"] {
            let saved = std::fs::read_to_string(temp.path().join(path)).unwrap();
            let catalog = OptionsCatalog::from_json(&saved).unwrap();
            assert_eq!(catalog.options("size", None), vec!["XL"], "{}", path);
        }
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_adds() {
        let temp = TempDir::new().unwrap();
        let store = file_store(temp.path());

        let before = store.snapshot();
        store.add_option("size", "S", None);
        assert!(before.is_empty());
        assert_eq!(store.snapshot().options("size", None), vec!["S"]);
    }

    #[test]
    fn test_subscribe_receives_online_transition() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("share")).unwrap();
        std::fs::write(temp.path().join("share/options.json"), r#"{"b": 2}"#).unwrap();
        let store = file_store(temp.path());

        let updates = store.subscribe();
        assert!(store.sync_now().is_synced());

        let states: Vec<ConnectionState> = updates.try_iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![ConnectionState::LoadingRemote, ConnectionState::Online]
        );
        assert!(store.last_synced_at().is_some());
    }
}
