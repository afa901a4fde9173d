//! Search feed generation.
//!
//! Every rendered page becomes one `put` operation for a document search
//! engine, carrying the page's plain text, title and outgoing links. Text and
//! links come from the content container left by the [`Pruner`], so site
//! navigation and footers are not indexed. The
//! operations are written as a pretty-printed JSON array to
//! `<namespace>_index.json`.
//!
//! ```json
//! [
//!   {
//!     "put": "id:open:doc::open/en/a.html",
//!     "fields": {
//!       "path": "/en/a.html",
//!       "namespace": "open",
//!       "title": "A",
//!       "content": "A Some text ",
//!       "term_count": 3,
//!       "last_updated": 1760745600,
//!       "outlinks": ["/en/b.html"]
//!     }
//!   }
//! ]
//! ```

use crate::convert::{Pruner, collapse_whitespace};
use crate::pages::PageRecord;
use crate::paths::DIRECTORY_INDEX;
use crate::storage::write_atomic;
use crate::{Error, Result};
use ego_tree::{NodeId, NodeRef};
use rayon::prelude::*;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// SAFETY: Selectors are compile-time constants that are known to be valid.
#[allow(clippy::unwrap_used)]
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
#[allow(clippy::unwrap_used)]
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
#[allow(clippy::unwrap_used)]
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// One document operation in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOperation {
    /// Document id, `id:<ns>:doc::<ns><path>`
    pub put: String,
    /// Document fields
    pub fields: FeedFields,
}

/// Indexed fields of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFields {
    /// Page URL, with `index.html` appended to directory URLs
    pub path: String,
    /// Document namespace
    pub namespace: String,
    /// Page title
    pub title: Option<String>,
    /// Plain text of the page on a single line
    pub content: String,
    /// Number of whitespace-separated terms in `content`
    pub term_count: usize,
    /// Unix timestamp of feed generation
    pub last_updated: i64,
    /// Non-empty `href` values of every link in the page content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlinks: Vec<String>,
}

/// File name of the feed for `namespace`.
#[must_use]
pub fn feed_file_name(namespace: &str) -> String {
    format!("{namespace}_index.json")
}

/// Build the feed operation for one page.
///
/// The title is looked up on the whole document; content and links come
/// from the container `pruner` selects. Returns `None` for pages with
/// neither a title nor any text, such as client-side redirect stubs.
#[must_use]
pub fn feed_operation(
    pruner: &Pruner,
    html: &str,
    url: &str,
    namespace: &str,
    last_updated: i64,
) -> Option<FeedOperation> {
    let mut document = Html::parse_document(html);
    let title = page_title(&document);
    let (content, outlinks) = match pruner.strip_chrome(&mut document) {
        Some(container) => (
            page_text(&document, container),
            outlinks(&document, container),
        ),
        None => (String::new(), Vec::new()),
    };

    if title.is_none() && content.trim().is_empty() {
        return None;
    }

    let mut path = url.to_string();
    if path.ends_with('/') {
        path.push_str(DIRECTORY_INDEX);
    }

    Some(FeedOperation {
        put: format!("id:{namespace}:doc::{namespace}{path}"),
        fields: FeedFields {
            term_count: content.split_whitespace().count(),
            outlinks,
            path,
            namespace: namespace.to_string(),
            title,
            content,
            last_updated,
        },
    })
}

/// Build feed operations for every page, in page order.
///
/// Pages that cannot be read are logged and left out.
#[must_use]
pub fn build_feed(pages: &[PageRecord], namespace: &str, pruner: &Pruner) -> Vec<FeedOperation> {
    let now = chrono::Utc::now().timestamp();
    let operations: Vec<FeedOperation> = pages
        .par_iter()
        .filter_map(|page| match fs::read_to_string(&page.source_path) {
            Ok(html) => {
                let op = feed_operation(pruner, &html, &page.url, namespace, now);
                if op.is_none() {
                    debug!(url = %page.url, "skipping empty page");
                }
                op
            },
            Err(err) => {
                warn!(url = %page.url, error = %err, "could not read page for feed");
                None
            },
        })
        .collect();
    info!(namespace, documents = operations.len(), "built search feed");
    operations
}

/// Write the feed as pretty-printed JSON into `dir`.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or the file cannot be written.
pub fn write_feed(operations: &[FeedOperation], dir: &Path, namespace: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| Error::Storage(format!("Failed to create {}: {e}", dir.display())))?;
    let json = serde_json::to_string_pretty(operations)?;
    let path = dir.join(feed_file_name(namespace));
    write_atomic(&path, &json)?;
    Ok(path)
}

/// Text below `container` without `style` and `script`, one line.
///
/// A newline follows every table cell so adjacent cells never merge into one
/// term.
fn page_text(document: &Html, container: NodeId) -> String {
    let mut text = String::new();
    if let Some(node) = document.tree.get(container) {
        collect_text(node, &mut text);
    }
    text.replace(['\r', '\n'], " ")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => match element.name() {
            "style" | "script" => {},
            name => {
                for child in node.children() {
                    collect_text(child, out);
                }
                if matches!(name, "th" | "td") {
                    out.push('\n');
                }
            },
        },
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        },
    }
}

fn page_title(document: &Html) -> Option<String> {
    [&*TITLE_SELECTOR, &*H1_SELECTOR]
        .into_iter()
        .filter_map(|selector| document.select(selector).next())
        .map(element_text)
        .find(|title| !title.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
        .trim()
        .to_string()
}

fn outlinks(document: &Html, container: NodeId) -> Vec<String> {
    let Some(root) = document.tree.get(container).and_then(ElementRef::wrap) else {
        return Vec::new();
    };
    root.select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
