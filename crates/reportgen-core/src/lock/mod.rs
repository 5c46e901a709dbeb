//! Advisory file locks around catalog files
//!
//! The options catalog lives on a shared location that several clients may
//! write. Writers take an exclusive lock on a sibling `.lock` file, readers a
//! shared one, so nobody observes a half-written catalog.

use std::path::{Path, PathBuf};
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Lock file guarding `target` (`options.json` → `options.json.lock`)
pub fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

/// Acquire an exclusive lock, retrying with backoff until `timeout`.
///
/// # Examples
///
/// ```no_run
/// use reportgen_core::lock::acquire_lock;
/// use std::path::Path;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let guard = acquire_lock(Path::new("/tmp/options.json.lock"), Duration::from_secs(5), "catalog write")?;
/// // write the catalog here
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, acquire::LockMode::Exclusive)
}

/// Acquire a shared lock, retrying with backoff until `timeout`.
///
/// Any number of shared holders may coexist; they conflict only with an
/// exclusive holder.
pub fn acquire_shared_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, acquire::LockMode::Shared)
}
