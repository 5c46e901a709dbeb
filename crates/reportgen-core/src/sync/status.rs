//! Connection state exposed to the host UI

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where the catalog currently in memory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogOrigin {
    Remote,
    Local,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    Init,
    LoadingLocal,
    LoadingRemote,
    Online,
    OfflineLocal,
    OfflineEmpty,
}

impl ConnectionState {
    pub fn is_online(self) -> bool {
        self == ConnectionState::Online
    }

    /// Short status line for a status bar
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Init => "Starting",
            ConnectionState::LoadingLocal => "Loading local copy",
            ConnectionState::LoadingRemote => "Synchronizing",
            ConnectionState::Online => "Online",
            ConnectionState::OfflineLocal => "Offline (using local copy)",
            ConnectionState::OfflineEmpty => "Offline (no local data)",
        }
    }
}

/// Snapshot of the sync state. Rebuilt every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub state: ConnectionState,
    pub source: CatalogOrigin,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl SyncStatus {
    pub(crate) fn initial() -> Self {
        Self {
            state: ConnectionState::Init,
            source: CatalogOrigin::Empty,
            last_synced_at: None,
        }
    }
}

/// Result of one remote synchronization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote copy adopted; `backup` reports whether the local copy was refreshed
    Synced { backup: Result<(), crate::sync::SyncError> },
    /// Remote copy unusable; the in-memory catalog is unchanged
    Failed(crate::sync::SyncError),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }
}
