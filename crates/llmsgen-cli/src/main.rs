//! llmsgen CLI - Markdown and llms.txt generation for a rendered documentation site
//!
//! This is the main entry point for the llmsgen command-line interface.

fn main() -> anyhow::Result<()> {
    llmsgen_cli::run()
}
