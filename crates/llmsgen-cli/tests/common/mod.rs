#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

#[allow(dead_code)]
pub const TEMPLATE: &str = "# Example Docs\n\n> Guides and reference.\n";

/// Create a configured `llmsgen` command running in `dir`.
///
/// Color and any ambient config file are disabled so output is stable.
#[allow(dead_code)]
pub fn llmsgen_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("llmsgen"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(dir);
    cmd.env_remove("LLMSGEN_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[allow(dead_code)]
pub fn write_page(root: &Path, rel: &str, html: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, html).unwrap();
}

/// Lay out `_site/` with three pages and `llms-template.md` under `dir`.
#[allow(dead_code)]
pub fn create_site(dir: &Path) {
    let site = dir.join("_site");
    write_page(
        &site,
        "index.html",
        "<body><main><h1>Home</h1><p>Start here. Then explore.</p></main></body>",
    );
    write_page(
        &site,
        "en/guides/install.html",
        "<html><head><title>Install</title></head><body><nav>Menu</nav>\
         <article><h1>Install</h1><p>Install the tool. It takes a minute.</p>\
         <pre><code class=\"language-sh\">cargo install example\n</code></pre></article></body></html>",
    );
    write_page(
        &site,
        "en/reference/cli.html",
        "<body><main><h1>CLI</h1><p>Every flag explained.</p><a href=\"/en/guides/install.html\">install</a></main></body>",
    );
    fs::write(dir.join("llms-template.md"), TEMPLATE).unwrap();
}
