//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Clone, Debug)]
#[command(name = "llmsgen")]
#[command(version)]
#[command(
    about = "Convert a rendered documentation site to Markdown and llms.txt",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honors `NO_COLOR`)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to the configuration file (defaults to ./llmsgen.toml)
    #[arg(long, global = true, value_name = "FILE", env = "LLMSGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Output format requested by the selected command, if it has one.
    pub const fn output_format(&self) -> Option<OutputFormat> {
        match &self.command {
            Commands::Build(args) => Some(args.format),
            Commands::Feed { format, .. } => Some(*format),
            Commands::Convert { .. } => None,
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Convert stale pages and write llms.txt, llms-full.txt and the search feed
    Build(BuildArgs),

    /// Print the Markdown for a single HTML file
    Convert {
        /// HTML file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write only the search feed
    Feed {
        /// Build output directory (overrides `site.output_dir`)
        #[arg(long, value_name = "DIR")]
        site: Option<PathBuf>,

        /// Document namespace (overrides `feed.namespace`)
        #[arg(long)]
        namespace: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Arguments for `llmsgen build`.
#[derive(Args, Clone, Debug)]
pub struct BuildArgs {
    /// Build output directory (overrides `site.output_dir`)
    #[arg(long, value_name = "DIR")]
    pub site: Option<PathBuf>,

    /// Public base URL for index links (overrides `site.base_url`)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Preamble template (overrides `site.template`)
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Conversion worker threads, 0 for automatic (overrides `convert.jobs`)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Reconvert every page even when its artifact is up to date
    #[arg(long)]
    pub force: bool,

    /// Skip the search feed
    #[arg(long = "no-feed")]
    pub no_feed: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
