//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Pick the log level for the given flags.
///
/// JSON output drops to errors only unless `--verbose` was given, so stdout
/// stays machine readable and stderr quiet.
pub const fn log_level(verbose: bool, quiet: bool, format: Option<OutputFormat>) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet || matches!(format, Some(OutputFormat::Json)) {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Install the global tracing subscriber on stderr and apply color settings.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let format = cli.output_format();
    let level = log_level(cli.verbose, cli.quiet, format);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let machine_output = matches!(format, Some(OutputFormat::Json));
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
