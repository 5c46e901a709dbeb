//! Options commands - query and extend the shared catalog

use crate::context::Context;
use crate::output;
use anyhow::{Result, bail};
use colored::Colorize;
use reportgen_core::AddOutcome;
use std::path::PathBuf;

/// List allowed values for `field`, one per line
pub fn list(
    config: Option<PathBuf>,
    field: String,
    parent: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let store = ctx.open_synced_store();
    let values = store.get_options(&field, parent.as_deref());

    if json {
        return output::print_json(&values);
    }

    if values.is_empty() {
        println!("{} No options for '{}'", "⚠".yellow(), field);
        return Ok(());
    }
    for value in values {
        output::print_text(&value)?;
    }
    Ok(())
}

/// Add `value` to `field` and write the catalog to both copies
pub fn add(
    config: Option<PathBuf>,
    field: String,
    value: String,
    parent: Option<String>,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let store = ctx.open_synced_store();

    match store.add_option(&field, &value, parent.as_deref()) {
        AddOutcome::Added { persist } => {
            println!("{} Added '{}' to '{}'", "✓".green(), value, field);
            if let Err(e) = &persist.local {
                println!("  {} Local copy not updated: {}", "⚠".yellow(), e);
            }
            if let Err(e) = &persist.remote {
                println!("  {} Shared catalog not updated: {}", "⚠".yellow(), e);
            }
        }
        AddOutcome::Duplicate => {
            println!("'{}' is already an option of '{}'", value, field);
        }
        AddOutcome::Rejected { reason } => {
            bail!("Cannot add '{}' to '{}': {}", value, field, reason);
        }
    }

    Ok(())
}

/// Print the field that controls `field`, if any
pub fn depends(config: Option<PathBuf>, field: String, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let store = ctx.open_store();

    match store.get_dependency_field(&field) {
        Some(parent) => output::print_text(&parent)?,
        None => println!("'{}' does not depend on another field", field),
    }
    Ok(())
}
