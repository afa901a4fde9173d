//! `llmsgen build`: the full documentation build

use anyhow::{Context, Result, bail};
use llmsgen_core::{BuildOptions, BuildPipeline, Config};
use std::path::Path;
use tracing::debug;

use crate::cli::BuildArgs;
use crate::output::{ConversionProgress, OutputFormat, print_build_report};

/// Run the build and print its report.
///
/// Fails when the pipeline aborts or when any page failed to convert, after
/// the report has been printed.
pub fn build(config_path: Option<&Path>, args: &BuildArgs, quiet: bool) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    apply_overrides(&mut config, args);
    debug!(site = %config.site.output_dir.display(), "starting build");

    let options = BuildOptions {
        force: args.force,
        skip_feed: args.no_feed,
    };
    let progress = ConversionProgress::new(quiet || matches!(args.format, OutputFormat::Json));
    let bar = progress.clone();
    let result = BuildPipeline::new(config, options)
        .with_progress(move |done, total| bar.update(done, total))
        .run();
    progress.finish();

    let report = result.context("Build failed")?;
    print_build_report(&report, args.format)?;

    if report.failed() > 0 {
        bail!("{} pages failed to convert", report.failed());
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &BuildArgs) {
    if let Some(site) = &args.site {
        config.site.output_dir.clone_from(site);
    }
    if let Some(base_url) = &args.base_url {
        config.site.base_url.clone_from(base_url);
    }
    if let Some(template) = &args.template {
        config.site.template.clone_from(template);
    }
    if let Some(jobs) = args.jobs {
        config.convert.jobs = jobs;
    }
}
