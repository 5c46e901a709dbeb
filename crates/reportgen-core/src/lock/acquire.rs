//! Lock acquisition with retry and timeout

use super::{LockError, LockGuard};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(250);
const SLOW_LOCK_THRESHOLD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LockMode {
    Exclusive,
    Shared,
}

impl LockMode {
    /// Through `FileExt`: newer `File` has inherent lock methods with a
    /// different error type.
    fn try_lock(self, file: &File) -> std::io::Result<()> {
        match self {
            LockMode::Exclusive => FileExt::try_lock_exclusive(file),
            LockMode::Shared => FileExt::try_lock_shared(file),
        }
    }
}

pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
    mode: LockMode,
) -> Result<LockGuard, LockError> {
    if let Some(parent) = lock_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| LockError::io(e, lock_path, "create parent directories"))?;
        }
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| LockError::io(e, lock_path, "open lock file"))?;

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut reported = false;

    loop {
        match mode.try_lock(&file) {
            Ok(()) => {
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if is_contended(&e) => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        description: description.to_string(),
                    });
                }

                if !reported && elapsed >= SLOW_LOCK_THRESHOLD {
                    log::info!(
                        "Waiting for lock on {} ({})",
                        lock_path.display(),
                        description
                    );
                    reported = true;
                }

                thread::sleep(retry_delay);
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => return Err(LockError::io(e, lock_path, "acquire lock")),
        }
    }
}

/// fs2 reports contention as `WouldBlock` on unix and as the raw
/// `ERROR_LOCK_VIOLATION` on windows.
fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
