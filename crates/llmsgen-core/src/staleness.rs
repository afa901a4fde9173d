//! Modification-time based rebuild decisions.

use crate::pages::PageRecord;
use crate::storage::{Storage, modified_time};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Whether the artifact at `artifact` is at least as new as its source.
///
/// A missing artifact is never fresh.
#[must_use]
pub fn is_fresh(source_last_modified: DateTime<Utc>, artifact: &Path) -> bool {
    modified_time(artifact)
        .map(DateTime::<Utc>::from)
        .is_some_and(|artifact_modified| artifact_modified >= source_last_modified)
}

/// Pages split by whether their artifact must be regenerated.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Pages whose artifact is missing or older than the HTML
    pub stale: Vec<&'a PageRecord>,
    /// Pages whose artifact is up to date
    pub fresh: Vec<&'a PageRecord>,
}

/// Partition pages into stale and fresh; `force` marks every page stale.
#[must_use]
pub fn partition<'a>(pages: &'a [PageRecord], storage: &Storage, force: bool) -> Partition<'a> {
    let mut partition = Partition::default();
    for page in pages {
        if !force && is_fresh(page.source_last_modified, &storage.artifact_path(&page.url)) {
            partition.fresh.push(page);
        } else {
            partition.stale.push(page);
        }
    }
    partition
}
