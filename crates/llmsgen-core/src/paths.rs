//! Mapping between site URLs and files in the build output.
//!
//! Three URL shapes occur on a rendered site:
//!
//! | URL           | HTML source          | Markdown artifact        |
//! |---------------|----------------------|--------------------------|
//! | `/`           | `index.html`         | `index.html.md`          |
//! | `/a/b/`       | `a/b/index.html`     | `a/b/index.html.md`      |
//! | `/a/b.html`   | `a/b.html`           | `a/b.html.md`            |
//!
//! The artifact path is a pure function of the URL, and always lands next to
//! the HTML file it was generated from. No `..` or percent-decoding is done;
//! URLs are expected to be site-relative and well formed.

use std::path::{Component, Path, PathBuf};

/// File name used for directory-style URLs.
pub const DIRECTORY_INDEX: &str = "index.html";

/// Resolve the Markdown artifact path for a site URL.
///
/// ```rust
/// use llmsgen_core::paths::markdown_path;
/// use std::path::Path;
///
/// let root = Path::new("_site");
/// assert_eq!(markdown_path(root, "/"), root.join("index.html.md"));
/// assert_eq!(markdown_path(root, "/en/"), root.join("en/index.html.md"));
/// assert_eq!(markdown_path(root, "/en/a.html"), root.join("en/a.html.md"));
/// ```
#[must_use]
pub fn markdown_path(output_root: &Path, url: &str) -> PathBuf {
    output_root.join(markdown_relative_path(url))
}

/// The artifact path relative to the output root, using `/` separators.
///
/// This is also the suffix appended to the base URL when linking to the
/// artifact from `llms.txt`.
#[must_use]
pub fn markdown_relative_path(url: &str) -> String {
    let relative = url.strip_prefix('/').unwrap_or(url);
    if url == "/" {
        format!("{DIRECTORY_INDEX}.md")
    } else if url.ends_with('/') {
        format!("{relative}{DIRECTORY_INDEX}.md")
    } else {
        format!("{relative}.md")
    }
}

/// Suffix that turns a page URL into the URL of its Markdown artifact.
#[must_use]
pub fn markdown_url_suffix(url: &str) -> &'static str {
    if url.ends_with('/') { "index.html.md" } else { ".md" }
}

/// Derive the site URL for an HTML file relative to the output root.
///
/// Returns `None` for paths that are not `.html` files or that contain
/// non-UTF-8 or parent-directory components.
///
/// ```rust
/// use llmsgen_core::paths::url_for_html_path;
/// use std::path::Path;
///
/// assert_eq!(url_for_html_path(Path::new("index.html")).as_deref(), Some("/"));
/// assert_eq!(url_for_html_path(Path::new("en/index.html")).as_deref(), Some("/en/"));
/// assert_eq!(url_for_html_path(Path::new("en/a.html")).as_deref(), Some("/en/a.html"));
/// assert_eq!(url_for_html_path(Path::new("style.css")), None);
/// ```
#[must_use]
pub fn url_for_html_path(relative: &Path) -> Option<String> {
    if relative.extension().and_then(|e| e.to_str()) != Some("html") {
        return None;
    }

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_str()?),
            Component::CurDir => {},
            _ => return None,
        }
    }

    let (file_name, dirs) = segments.split_last()?;
    let mut url = String::from("/");
    for dir in dirs {
        url.push_str(dir);
        url.push('/');
    }
    if *file_name != DIRECTORY_INDEX {
        url.push_str(file_name);
    }
    Some(url)
}
