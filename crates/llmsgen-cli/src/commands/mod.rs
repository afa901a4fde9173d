//! Command implementations.

mod build;
mod convert;
mod feed;

pub use build::build;
pub use convert::convert_file;
pub use feed::feed;

use anyhow::{Context, Result};
use llmsgen_core::Config;
use std::path::Path;

/// Load the configuration file named on the command line, or the default one.
fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}
