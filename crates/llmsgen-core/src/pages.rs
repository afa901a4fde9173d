//! Discovery of rendered HTML pages in the build output.

use crate::paths::url_for_html_path;
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// One rendered HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// HTML file on disk
    pub source_path: PathBuf,
    /// Site-relative URL (`/`, `/a/`, `/a/b.html`)
    pub url: String,
    /// Modification time of the HTML file
    pub source_last_modified: DateTime<Utc>,
}

impl PageRecord {
    /// Whether the URL starts with any of the given prefixes.
    #[must_use]
    pub fn is_excluded(&self, exclude: &[String]) -> bool {
        exclude.iter().any(|prefix| self.url.starts_with(prefix.as_str()))
    }
}

/// Enumerate every `.html` file under `root`.
///
/// Entries are visited sorted by file name, so the returned order is stable
/// across runs. URLs starting with an `exclude` prefix are skipped.
///
/// # Errors
///
/// Returns an error if the directory walk fails, for example because `root`
/// does not exist or a directory is unreadable.
pub fn discover_pages(root: &Path, exclude: &[String]) -> Result<Vec<PageRecord>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(url) = url_for_html_path(relative) else {
            continue;
        };

        let modified = entry.metadata()?.modified()?;
        let page = PageRecord {
            source_path: entry.path().to_path_buf(),
            url,
            source_last_modified: DateTime::<Utc>::from(modified),
        };

        if page.is_excluded(exclude) {
            trace!(url = %page.url, "excluded");
            continue;
        }
        pages.push(page);
    }

    debug!(count = pages.len(), root = %root.display(), "discovered pages");
    Ok(pages)
}
