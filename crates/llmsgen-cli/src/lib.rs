//! llmsgen CLI library entry point.
//!
//! Parses the command line, installs logging and dispatches to the command
//! implementations in [`commands`].

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use crate::utils::initialize_logging;
use cli::{Cli, Commands};

/// Execute the llmsgen CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging cannot be installed, the configuration cannot
/// be loaded, or the selected command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let config_path = cli.config.clone();
    match cli.command {
        Commands::Build(args) => {
            commands::build(config_path.as_deref(), &args, quiet)?;
        },
        Commands::Convert { file } => {
            commands::convert_file(config_path.as_deref(), &file)?;
        },
        Commands::Feed {
            site,
            namespace,
            format,
        } => {
            commands::feed(
                config_path.as_deref(),
                site.as_deref(),
                namespace.as_deref(),
                format,
            )?;
        },
    }
    Ok(())
}
