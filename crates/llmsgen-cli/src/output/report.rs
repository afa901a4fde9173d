//! Text and JSON rendering of command results

use anyhow::Result;
use colored::Colorize;
use llmsgen_core::BuildReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::OutputFormat;

/// Print a build report to stdout.
pub fn print_build_report(report: &BuildReport, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_build_report(&mut out, report, format)
}

/// Print the location of a written feed to stdout.
pub fn print_feed_result(path: &Path, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_feed_result(&mut out, path, format)
}

fn write_build_report<W: Write>(
    out: &mut W,
    report: &BuildReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        },
        OutputFormat::Text => {
            writeln!(
                out,
                "{} Converted {} of {} pages ({} up to date) in {}ms",
                "✓".green(),
                report.converted.to_string().bold(),
                report.pages,
                report.fresh,
                report.elapsed_ms
            )?;

            if !report.failures.is_empty() {
                writeln!(
                    out,
                    "{} {} pages failed to convert:",
                    "✗".red(),
                    report.failed()
                )?;
                for failure in &report.failures {
                    writeln!(out, "  {} {}", failure.url.red(), failure.error.dimmed())?;
                }
            }

            writeln!(out, "  Indexed {} pages", report.indexed)?;
            let written = [
                &report.summary_path,
                &report.full_path,
                &report.published_path,
                &report.feed_path,
            ];
            for path in written.into_iter().flatten() {
                writeln!(out, "  Wrote {}", path.display().to_string().cyan())?;
            }
        },
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedResult<'a> {
    feed_path: &'a Path,
}

fn write_feed_result<W: Write>(out: &mut W, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let result = FeedResult { feed_path: path };
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        },
        OutputFormat::Text => {
            writeln!(
                out,
                "{} Wrote feed {}",
                "✓".green(),
                path.display().to_string().cyan()
            )?;
        },
    }
    Ok(())
}
