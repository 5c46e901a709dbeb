//! Sync error types

use std::time::Duration;
use thiserror::Error;

/// Failure to read or write one copy of the catalog.
///
/// These never reach callers of the options store as errors; they are
/// logged and reported through outcome values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("{source_name}: catalog not found")]
    Absent { source_name: String },

    #[error("{source_name}: unreachable: {reason}")]
    Unreachable { source_name: String, reason: String },

    #[error("{source_name}: malformed catalog: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("{source_name}: no answer within {}ms", .timeout.as_millis())]
    Timeout {
        source_name: String,
        timeout: Duration,
    },

    #[error("{source_name}: write failed: {reason}")]
    Write { source_name: String, reason: String },
}
