//! `llmsgen feed`: write only the search feed

use anyhow::{Context, Result, bail};
use llmsgen_core::{BuildOptions, BuildPipeline};
use std::path::Path;

use crate::output::{OutputFormat, print_feed_result};

/// Write `<namespace>_index.json` for the site and print where it went.
pub fn feed(
    config_path: Option<&Path>,
    site: Option<&Path>,
    namespace: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(site) = site {
        config.site.output_dir = site.to_path_buf();
    }
    if let Some(namespace) = namespace {
        if namespace.trim().is_empty() || namespace.contains(':') {
            bail!("Invalid namespace '{namespace}': must be non-empty and contain no ':'");
        }
        config.feed.namespace = Some(namespace.to_string());
    }

    let path = BuildPipeline::new(config, BuildOptions::default())
        .run_feed()
        .context("Feed generation failed")?;
    print_feed_result(&path, format)
}
