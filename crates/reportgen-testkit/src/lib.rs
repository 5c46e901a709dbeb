//! Test utilities for reportgen
//!
//! This crate provides shared testing utilities used across the reportgen workspace.

pub mod fixtures;

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test files land in one gitignored location that is easy to clean up
/// manually if a test aborts.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use reportgen_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("options.json");
/// std::fs::write(&file_path, "{}").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Run a test with an isolated user configuration directory
///
/// Points `HOME` and `XDG_CONFIG_HOME` at a fresh directory so the
/// per-user `reportgen/config.toml` of the developer running the tests is
/// never picked up. The closure receives the isolated config root.
pub fn with_isolated_config_env<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

    let original_home = std::env::var("HOME").ok();
    let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();

    let fake_home = TempDir::new().expect("Failed to create isolated HOME");
    let config_root = fake_home.path().join(".config");
    std::fs::create_dir_all(&config_root).expect("Failed to create config dir");

    // SAFETY: ENV_LOCK is held for the whole closure, so no other test in
    // this binary touches the environment concurrently.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("XDG_CONFIG_HOME", &config_root);
    }

    let result = f(config_root.as_path());

    // SAFETY: ENV_LOCK is still held.
    unsafe {
        match original_home {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
        match original_xdg {
            Some(xdg) => std::env::set_var("XDG_CONFIG_HOME", xdg),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace() {
        let temp = temp_dir_in_workspace();
        assert!(temp.path().exists());
        assert!(temp.path().to_string_lossy().contains(".tmp"));
    }

    #[test]
    fn test_isolated_config_env_restores_home() {
        let before = std::env::var("HOME").ok();
        with_isolated_config_env(|root| {
            assert_eq!(
                std::env::var("XDG_CONFIG_HOME").ok().as_deref(),
                root.to_str()
            );
        });
        assert_eq!(std::env::var("HOME").ok(), before);
    }
}
