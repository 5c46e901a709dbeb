//! Global context for CLI commands

use anyhow::{Context as _, Result};
use reportgen_core::OptionsStore;
use reportgen_core::config::AppConfig;
use std::env;
use std::path::PathBuf;

/// Configuration shared by every command
pub struct Context {
    pub config: AppConfig,
    /// The file the configuration came from, `None` for built-in defaults
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Context {
    /// Locate and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or discovered config file cannot be
    /// read or parsed.
    pub fn new(explicit: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine working directory")?;
        let (config, config_path) = AppConfig::discover(explicit.as_deref(), &cwd)?;

        Ok(Self {
            config,
            config_path,
            verbose,
        })
    }

    /// Open the options store from the local copy
    pub fn open_store(&self) -> OptionsStore {
        OptionsStore::from_config(&self.config)
    }

    /// Open the options store and make one bounded attempt to reach the
    /// shared catalog
    ///
    /// A failed attempt leaves the store on its local copy; the reason is
    /// logged.
    pub fn open_synced_store(&self) -> OptionsStore {
        let store = self.open_store();
        store.sync_now();
        store
    }
}
