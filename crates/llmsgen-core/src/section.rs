//! Section names and page summaries for the index documents.
//!
//! Every page is grouped under a section derived from its URL, and is
//! summarized by a title and a one-sentence description read back from its
//! Markdown artifact.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Locale prefix whose following segment names the section.
const LOCALE_PREFIX: &str = "en";

/// Section used when a URL has no path segments.
const ROOT_SECTION: &str = "root";

/// Section used when an absolute URL cannot be parsed.
pub const UNKNOWN_SECTION: &str = "Unknown";

/// Level-one ATX heading.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+)").unwrap());

/// Title and description of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    /// Page title
    pub title: String,
    /// First sentence of the first paragraph, if any
    pub description: Option<String>,
}

/// Derive the display section for a page URL.
///
/// ```rust
/// use llmsgen_core::section::section_for_url;
///
/// assert_eq!(section_for_url("/en/reference/foo.html"), "Reference");
/// assert_eq!(section_for_url("/en/"), "En");
/// assert_eq!(section_for_url("/about.html"), "About");
/// assert_eq!(section_for_url("https://docs.vespa.ai/en/getting-started/"), "Getting Started");
/// ```
#[must_use]
pub fn section_for_url(url: &str) -> String {
    let Some(path) = url_path(url) else {
        return UNKNOWN_SECTION.to_string();
    };

    let segments = path_segments(&path);
    let raw = match segments.as_slice() {
        [first, second, ..] if *first == LOCALE_PREFIX => *second,
        [first, ..] => *first,
        [] => ROOT_SECTION,
    };
    title_case(&raw.replace('-', " "))
}

/// Uppercase the first letter of every space-separated word.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title derived from the URL alone.
///
/// The last segment with `.html` stripped; `index` and directory URLs use
/// the parent segment.
#[must_use]
pub fn fallback_title(url: &str) -> String {
    let path = url_path(url).unwrap_or_default();
    let segments = path_segments(&path);
    let mut candidates = segments.iter().rev().filter(|s| **s != "index");
    candidates
        .next()
        .map_or_else(|| ROOT_SECTION.to_string(), |s| (*s).to_string())
}

/// Extract the title and description from page Markdown.
///
/// The first `# ` heading is the title; the first following line that is
/// neither blank nor a heading supplies the description. Without a heading
/// the title falls back to [`fallback_title`] and there is no description.
#[must_use]
pub fn summarize_markdown(markdown: &str, url: &str) -> PageSummary {
    let mut lines = markdown.lines();
    let title = lines.by_ref().find_map(|line| {
        TITLE_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    });

    let Some(title) = title else {
        return PageSummary {
            title: fallback_title(url),
            description: None,
        };
    };

    let description = lines
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(first_sentence);

    PageSummary { title, description }
}

/// The text up to and including the first `. `, else the whole line.
fn first_sentence(line: &str) -> String {
    match line.find(". ") {
        Some(idx) => line[..=idx].to_string(),
        // A line ending in "." and any other line are both kept whole.
        None => line.to_string(),
    }
}

/// Site-relative path of `url`, without query or fragment.
///
/// Absolute URLs are parsed; `None` means the URL could not be parsed.
fn url_path(url: &str) -> Option<String> {
    if url.contains("://") {
        return Url::parse(url).ok().map(|parsed| parsed.path().to_string());
    }
    let end = url.find(['?', '#']).unwrap_or(url.len());
    Some(url[..end].to_string())
}

fn path_segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix(".html").unwrap_or(trimmed);
    trimmed.split('/').filter(|s| !s.is_empty()).collect()
}
