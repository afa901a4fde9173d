//! Output formatting for command results.
//!
//! - [`OutputFormat`]: the `--format` choices
//! - [`progress`]: the conversion progress bar
//! - [`report`]: text and JSON rendering of build results

pub mod progress;
pub mod report;

/// Output format for command results
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default)
    Text,
    /// Single JSON document
    Json,
}

pub use progress::ConversionProgress;
pub use report::{print_build_report, print_feed_result};
