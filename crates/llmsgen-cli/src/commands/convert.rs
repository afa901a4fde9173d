//! `llmsgen convert`: print one page as Markdown

use anyhow::{Context, Result};
use llmsgen_core::HtmlConverter;
use std::io::Write;
use std::path::Path;

/// Convert `file` with the configured selectors and write the Markdown to stdout.
pub fn convert_file(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let converter = HtmlConverter::new(&config.convert).context("Invalid convert selectors")?;
    let markdown = converter.convert(&html);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(markdown.as_bytes())?;
    out.flush()?;
    Ok(())
}
