//! End-to-end builds over a small rendered site

#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

use llmsgen_core::{BuildOptions, BuildPipeline, Config, FeedOperation};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TEMPLATE: &str = "# Vespa Documentation\n\n> Everything about Vespa.\n";

fn write_page(root: &Path, rel: &str, html: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, html).unwrap();
}

/// A site with a tutorial, a reference page, a directory index, a 404 page,
/// a redirect stub and an excluded asset directory.
fn create_site(dir: &Path) -> Config {
    let site = dir.join("_site");
    write_page(
        &site,
        "en/tutorials/start.html",
        "<body><main><h1>Start</h1><p>First sentence. More text.</p></main></body>",
    );
    write_page(
        &site,
        "en/reference/query-api.html",
        r#"<html><head><title>Query API</title></head><body>
<nav class="site-nav"><a href="/">Home</a></nav>
<div class="content">
  <p class="breadcrumb">Reference</p>
  <h1>Query API</h1>
  <p>The query API accepts YQL. It returns JSON.</p>
  <h2>Parameters</h2>
  <table><tr><th>Name</th><th>Default</th></tr><tr><td>hits</td><td>10</td></tr></table>
  <h3>Example</h3>
  <pre><code class="language-sh"># fetch ten hits
vespa query 'select * from music where true'
</code></pre>
</div>
<footer>Copyright</footer>
</body></html>"#,
    );
    write_page(
        &site,
        "en/index.html",
        "<body><main><h1>Vespa</h1><p>Welcome to the docs.</p></main></body>",
    );
    write_page(
        &site,
        "404.html",
        "<body><main><h1>Not found</h1><p>Sorry.</p></main></body>",
    );
    write_page(
        &site,
        "en/old.html",
        "<body><main><h1>Redirecting…</h1></main></body>",
    );
    write_page(&site, "css/theme.html", "<body><p>asset</p></body>");

    fs::write(dir.join("llms-template.md"), TEMPLATE).unwrap();

    let mut config = Config::default();
    config.site.output_dir = site;
    config.site.template = dir.join("llms-template.md");
    config.site.base_url = "https://docs.vespa.ai/".to_string();
    config.site.exclude = vec!["/css/".to_string()];
    config.feed.namespace = Some("open".to_string());
    config
}

#[test]
fn test_single_page_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = create_site(dir.path());
    let site = config.site.output_dir.clone();

    let report = BuildPipeline::new(config, BuildOptions::default())
        .run()
        .unwrap();
    assert_eq!(report.pages, 5);
    assert_eq!(report.converted, 5);
    assert!(report.failures.is_empty());

    let artifact = fs::read_to_string(site.join("en/tutorials/start.html.md")).unwrap();
    assert_eq!(artifact, "# Start\n\nFirst sentence. More text.\n\n");

    let summary = fs::read_to_string(site.join("llms.txt")).unwrap();
    assert!(summary.contains(
        "## Tutorials\n\n- [Start](https://docs.vespa.ai/en/tutorials/start.html.md): First sentence.\n"
    ));
}

#[test]
fn test_summary_document_layout() {
    let dir = TempDir::new().unwrap();
    let config = create_site(dir.path());
    let site = config.site.output_dir.clone();
    BuildPipeline::new(config, BuildOptions::default())
        .run()
        .unwrap();

    let summary = fs::read_to_string(site.join("llms.txt")).unwrap();
    assert!(summary.starts_with(TEMPLATE));
    assert!(!summary.contains("404"));
    assert!(!summary.contains("Redirecting"));
    assert!(!summary.contains("theme"));
    assert!(summary.contains(
        "- [Query API](https://docs.vespa.ai/en/reference/query-api.html.md): The query API accepts YQL.\n"
    ));
    assert!(summary.contains("## En\n\n- [Vespa](https://docs.vespa.ai/en/index.html.md): Welcome to the docs.\n"));

    // Sections appear in discovery order: siblings are visited by file name,
    // so en/index.html comes before the en/ subdirectories.
    let en = summary.find("## En").unwrap();
    let reference = summary.find("## Reference").unwrap();
    let tutorials = summary.find("## Tutorials").unwrap();
    assert!(en < reference && reference < tutorials);

    let published = fs::read_to_string(dir.path().join("llms.txt")).unwrap();
    assert_eq!(published, summary);
}

#[test]
fn test_full_document_nests_page_content() {
    let dir = TempDir::new().unwrap();
    let config = create_site(dir.path());
    let site = config.site.output_dir.clone();
    BuildPipeline::new(config, BuildOptions::default())
        .run()
        .unwrap();

    let full = fs::read_to_string(site.join("llms-full.txt")).unwrap();
    assert!(full.starts_with(TEMPLATE));
    assert!(full.contains("### Query API\n\nThe query API accepts YQL.\n\n#### Query API\n\n"));
    assert!(full.contains("##### Parameters\n\n| Name | Default |\n| --- | --- |\n| hits | 10 |\n"));
    assert!(full.contains("###### Example\n\n```sh\n# fetch ten hits\n"));
    assert!(!full.contains("breadcrumb"));
    assert!(!full.contains("Copyright"));
    assert_eq!(full.matches("\n---\n").count(), 3);
}

#[test]
fn test_feed_is_written_next_to_site() {
    let dir = TempDir::new().unwrap();
    let config = create_site(dir.path());
    let report = BuildPipeline::new(config, BuildOptions::default())
        .run()
        .unwrap();

    let feed_path = report.feed_path.unwrap();
    assert_eq!(feed_path, dir.path().join("open_index.json"));

    let ops: Vec<FeedOperation> =
        serde_json::from_str(&fs::read_to_string(feed_path).unwrap()).unwrap();
    let paths: Vec<&str> = ops.iter().map(|op| op.fields.path.as_str()).collect();
    assert!(paths.contains(&"/en/index.html"));
    assert!(paths.contains(&"/en/reference/query-api.html"));
    assert!(!paths.iter().any(|p| p.starts_with("/css/")));

    let query = ops
        .iter()
        .find(|op| op.fields.path == "/en/reference/query-api.html")
        .unwrap();
    assert_eq!(query.put, "id:open:doc::open/en/reference/query-api.html");
    assert_eq!(query.fields.title.as_deref(), Some("Query API"));
    assert!(query.fields.content.contains("The query API accepts YQL."));
    assert!(!query.fields.content.contains("Home"));
    assert!(!query.fields.content.contains("Copyright"));
    assert!(query.fields.outlinks.is_empty());
}

#[test]
fn test_stale_page_is_reconverted() {
    let dir = TempDir::new().unwrap();
    let config = create_site(dir.path());
    let site = config.site.output_dir.clone();
    BuildPipeline::new(config.clone(), BuildOptions::default())
        .run()
        .unwrap();

    // Push the artifact into the past so the HTML is newer.
    let artifact = site.join("en/tutorials/start.html.md");
    let past = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&artifact)
        .unwrap()
        .set_modified(past)
        .unwrap();

    let report = BuildPipeline::new(config, BuildOptions::default())
        .run()
        .unwrap();
    assert_eq!(report.converted, 1);
    assert_eq!(report.fresh, 4);
}
