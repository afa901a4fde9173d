//! Tests for `llmsgen convert` and `llmsgen feed`

#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{create_site, llmsgen_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn convert_prints_markdown() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("page.html"),
        "<body><header>Site</header><main><h2>Usage</h2><ul><li>one</li><li><code>two</code></li></ul></main></body>",
    )
    .unwrap();

    llmsgen_cmd(dir.path())
        .args(["convert", "page.html"])
        .assert()
        .success()
        .stdout("## Usage\n\n- one\n- `two`\n\n");
}

#[test]
fn convert_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    llmsgen_cmd(dir.path())
        .args(["convert", "absent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read absent.html"));
}

#[test]
fn feed_writes_namespace_file() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    llmsgen_cmd(dir.path())
        .args(["feed", "--namespace", "open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open_index.json"));

    let feed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("open_index.json")).unwrap())
            .unwrap();
    let ops = feed.as_array().unwrap();
    assert_eq!(ops.len(), 3);

    let cli = ops
        .iter()
        .find(|op| op["fields"]["path"] == "/en/reference/cli.html")
        .unwrap();
    assert_eq!(cli["put"], "id:open:doc::open/en/reference/cli.html");
    assert_eq!(cli["fields"]["outlinks"][0], "/en/guides/install.html");
    assert_eq!(cli["fields"]["title"], "CLI");
}

#[test]
fn feed_without_namespace_fails() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    llmsgen_cmd(dir.path())
        .arg("feed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace"));
}

#[test]
fn feed_rejects_invalid_namespace() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    llmsgen_cmd(dir.path())
        .args(["feed", "--namespace", "a:b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid namespace"));
}
