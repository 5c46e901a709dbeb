//! Status command - show catalog connection state

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use reportgen_core::sync::{ConnectionState, SyncOutcome};
use serde_json::json;
use std::path::PathBuf;

/// Load the local copy, try the shared catalog once, and report the result
///
/// Always exits 0: an unreachable shared catalog is a state, not an error.
pub fn run(config: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let store = ctx.open_store();
    let outcome = store.sync_now();
    let status = store.status();
    let catalog = store.snapshot();

    let error = match &outcome {
        SyncOutcome::Failed(e) => Some(e.to_string()),
        SyncOutcome::Synced { .. } => None,
    };

    if json {
        let output = json!({
            "state": status.state,
            "source": status.source,
            "last_synced_at": status.last_synced_at,
            "fields": catalog.len(),
            "remote": ctx.config.remote_catalog_path().display().to_string(),
            "error": error,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let icon = match status.state {
        ConnectionState::Online => "✓".green(),
        ConnectionState::OfflineLocal => "⚠".yellow(),
        _ => "✗".red(),
    };
    println!("{} {}", icon, status.state.label());

    match status.last_synced_at {
        Some(at) => println!(
            "  Last synchronized: {}",
            at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("  Last synchronized: never"),
    }
    println!("  Fields in catalog: {}", catalog.len());

    match &outcome {
        SyncOutcome::Failed(e) => println!("  {}", e),
        SyncOutcome::Synced { backup: Err(e) } => {
            println!("  {} Local copy not updated: {}", "⚠".yellow(), e)
        }
        SyncOutcome::Synced { backup: Ok(()) } => {}
    }

    if ctx.verbose {
        println!("  Shared catalog: {}", ctx.config.remote_catalog_path().display());
        println!("  Local copy: {}", ctx.config.sync.local_backup.display());
        match &ctx.config_path {
            Some(path) => println!("  Config: {}", path.display()),
            None => println!("  Config: built-in defaults"),
        }
    }

    Ok(())
}
