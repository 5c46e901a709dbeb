//! Render command - fill a template from a profile and a data file

use crate::context::Context;
use crate::output;
use anyhow::{Context as _, Result};
use colored::Colorize;
use reportgen_core::profile::{Profile, ReportData, ReportRequest};
use std::path::{Path, PathBuf};

pub fn run(
    config: Option<PathBuf>,
    profile_path: PathBuf,
    data_path: PathBuf,
    output_path: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;

    let profile = Profile::load(&profile_path)?;
    let data = ReportData::load(&data_path)?;
    let template = resolve_template(&ctx, &profile, &profile_path);

    if ctx.verbose {
        eprintln!(
            "{} Rendering '{}' with {}",
            "→".cyan(),
            profile.display_name(),
            template.display()
        );
    }

    let html = ReportRequest::new(profile, &profile_path)
        .with_data(data)
        .format_dates(&ctx.config.report.date_format)
        .render_from(&template)?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Report written to {}", "✓".green(), path.display());
        }
        None => output::print_text(&html)?,
    }

    Ok(())
}

/// The template next to the profile, else the shared templates folder
///
/// When neither exists the profile-relative path is returned so the error
/// names the location the profile asked for.
fn resolve_template(ctx: &Context, profile: &Profile, profile_path: &Path) -> PathBuf {
    let beside_profile = profile.template_file(profile_path);
    if beside_profile.is_file() {
        return beside_profile;
    }

    let shared = ctx.config.templates_dir().join(&profile.template_path);
    if shared.is_file() {
        log::debug!("Using shared template {}", shared.display());
        return shared;
    }

    beside_profile
}
