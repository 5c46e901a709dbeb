mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands, OptionsCommands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            profile,
            data,
            output,
        } => commands::render::run(cli.config, profile, data, output, cli.verbose),
        Commands::Options(options_cmd) => match options_cmd {
            OptionsCommands::List {
                field,
                parent,
                json,
            } => commands::options::list(cli.config, field, parent, json, cli.verbose),
            OptionsCommands::Add {
                field,
                value,
                parent,
            } => commands::options::add(cli.config, field, value, parent, cli.verbose),
            OptionsCommands::Depends { field } => {
                commands::options::depends(cli.config, field, cli.verbose)
            }
        },
        Commands::Status { json } => commands::status::run(cli.config, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with `--verbose`; `RUST_LOG` wins over both
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
