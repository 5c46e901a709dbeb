//! Catalog synchronization
//!
//! The options catalog has two copies: an authoritative one on a shared
//! location and a local backup. At startup the local backup is adopted
//! inline so the catalog is usable at once, and the remote copy is fetched
//! afterwards in the background. A good remote copy replaces the in-memory
//! catalog and overwrites the backup. On failure the catalog stays as it was.
//!
//! ```text
//! INIT → LOADING_LOCAL → OFFLINE_LOCAL | OFFLINE_EMPTY
//!                      → LOADING_REMOTE → ONLINE
//!                                       ↘ (previous offline state)
//! ```

mod error;
mod policy;
mod source;
mod status;

pub use error::SyncError;
pub use policy::{LocalLoad, PersistReport, SyncPolicy, SyncSettings};
pub use source::{CatalogSource, FileSource};
pub use status::{CatalogOrigin, ConnectionState, SyncOutcome, SyncStatus};
