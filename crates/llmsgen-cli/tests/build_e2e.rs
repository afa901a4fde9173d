//! End-to-end tests for `llmsgen build`

#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{TEMPLATE, create_site, llmsgen_cmd, write_page};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn build_writes_artifacts_and_index_documents() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    llmsgen_cmd(dir.path())
        .args(["build", "--base-url", "https://docs.example.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 3 of 3 pages"))
        .stdout(predicate::str::contains("llms-full.txt"));

    let site = dir.path().join("_site");
    let artifact = fs::read_to_string(site.join("en/guides/install.html.md")).unwrap();
    assert!(artifact.starts_with("# Install\n\nInstall the tool. It takes a minute.\n\n"));
    assert!(artifact.contains("```sh\ncargo install example\n```"));
    assert!(!artifact.contains("Menu"));

    let summary = fs::read_to_string(site.join("llms.txt")).unwrap();
    assert!(summary.starts_with(TEMPLATE));
    assert!(summary.contains("## Root\n\n- [Home](https://docs.example.com/index.html.md): Start here.\n"));
    assert!(summary.contains(
        "## Guides\n\n- [Install](https://docs.example.com/en/guides/install.html.md): Install the tool.\n"
    ));

    // llms.txt is also published next to the output directory
    let published = fs::read_to_string(dir.path().join("llms.txt")).unwrap();
    assert_eq!(published, summary);
}

#[test]
fn second_build_only_reports_fresh_pages() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    let args = ["build", "--base-url", "https://docs.example.com"];

    llmsgen_cmd(dir.path()).args(args).assert().success();
    llmsgen_cmd(dir.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 0 of 3 pages (3 up to date)"));

    llmsgen_cmd(dir.path())
        .args(args)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 3 of 3 pages"));
}

#[test]
fn build_json_report() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    let output = llmsgen_cmd(dir.path())
        .args([
            "build",
            "--base-url",
            "https://docs.example.com",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pages"], 3);
    assert_eq!(report["converted"], 3);
    assert_eq!(report["indexed"], 3);
    assert!(report["failures"].as_array().unwrap().is_empty());
    assert!(report["feedPath"].is_null());
}

#[test]
fn build_reads_config_file() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    fs::write(
        dir.path().join("llmsgen.toml"),
        "[site]\nbase_url = \"https://docs.example.com\"\nexclude = [\"/en/reference/\"]\n\n[feed]\nnamespace = \"open\"\n",
    )
    .unwrap();

    llmsgen_cmd(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2 of 2 pages"));

    let summary = fs::read_to_string(dir.path().join("_site/llms.txt")).unwrap();
    assert!(!summary.contains("CLI"));
    assert!(dir.path().join("open_index.json").is_file());
}

#[test]
fn build_without_base_url_fails() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    llmsgen_cmd(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));

    // Conversion still ran before the index step aborted
    assert!(dir.path().join("_site/index.html.md").is_file());
    assert!(!dir.path().join("_site/llms.txt").exists());
}

#[test]
fn build_without_template_fails() {
    let dir = TempDir::new().unwrap();
    write_page(&dir.path().join("_site"), "index.html", "<main><h1>Home</h1></main>");

    llmsgen_cmd(dir.path())
        .args(["build", "--base-url", "https://docs.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("llms-template.md"));
}

#[test]
fn build_missing_site_directory_fails() {
    let dir = TempDir::new().unwrap();

    llmsgen_cmd(dir.path())
        .args(["build", "--site", "nowhere", "--base-url", "https://docs.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    llmsgen_cmd(dir.path())
        .args(["build", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
