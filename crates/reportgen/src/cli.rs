//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(version, about = "Fill HTML report templates and manage shared field options", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./reportgen.toml, then the user config dir)
    #[arg(long, global = true, env = "REPORTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a report from a profile and a data file
    Render {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Data JSON file with `fields` and `tables`
        #[arg(long)]
        data: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query and extend the shared options catalog
    #[command(subcommand)]
    Options(OptionsCommands),

    /// Synchronize with the shared catalog and show the connection state
    Status {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum OptionsCommands {
    /// List allowed values for a field
    List {
        field: String,

        /// Value of the controlling field, for dependent fields
        #[arg(long)]
        parent: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Add a value to a field
    Add {
        field: String,

        value: String,

        /// Value of the controlling field the new value belongs to
        #[arg(long)]
        parent: Option<String>,
    },

    /// Show which field controls a field's options
    Depends { field: String },
}
