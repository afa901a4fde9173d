//! The end-to-end documentation build.
//!
//! A build runs in two phases over the rendered site:
//!
//! 1. **Conversion** (parallel): every page whose Markdown artifact is
//!    missing or older than its HTML is converted on a rayon pool. Output
//!    directories are created up front, so workers only write files.
//! 2. **Indexing** (sequential): artifacts are read back in discovery order,
//!    grouped by section and assembled into `llms.txt` and `llms-full.txt`.
//!
//! When a feed namespace is configured the search feed is written as well.
//!
//! ```rust,no_run
//! use llmsgen_core::{BuildOptions, BuildPipeline, Config};
//!
//! let config = Config::load(None)?;
//! let report = BuildPipeline::new(config, BuildOptions::default())
//!     .with_progress(|done, total| eprintln!("{done}/{total}"))
//!     .run()?;
//! println!("converted {} pages", report.converted);
//! # Ok::<(), llmsgen_core::Error>(())
//! ```

use crate::config::Config;
use crate::convert::{HtmlConverter, Pruner};
use crate::feed::{build_feed, write_feed};
use crate::generate::{
    FULL_FILE_NAME, IndexAssembler, SUMMARY_FILE_NAME, SectionEntry, SectionIndex,
};
use crate::pages::{PageRecord, discover_pages};
use crate::section::{PageSummary, fallback_title, section_for_url, summarize_markdown};
use crate::staleness::partition;
use crate::storage::Storage;
use crate::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Progress callback type for reporting conversion progress.
///
/// Called with (completed, total) after each page is converted.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Per-run switches that are not part of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Regenerate every artifact regardless of modification times
    pub force: bool,
    /// Skip the search feed even when a namespace is configured
    pub skip_feed: bool,
}

/// A page whose conversion failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFailure {
    /// Page URL
    pub url: String,
    /// Error message
    pub error: String,
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Pages discovered in the output directory
    pub pages: usize,
    /// Artifacts written in this run
    pub converted: usize,
    /// Artifacts that were already up to date
    pub fresh: usize,
    /// Pages whose conversion failed
    pub failures: Vec<PageFailure>,
    /// Pages listed in the index documents
    pub indexed: usize,
    /// Written `llms.txt`
    pub summary_path: Option<PathBuf>,
    /// Written `llms-full.txt`
    pub full_path: Option<PathBuf>,
    /// Copy of `llms.txt` above the output root
    pub published_path: Option<PathBuf>,
    /// Written search feed
    pub feed_path: Option<PathBuf>,
    /// Wall-clock duration of the build in milliseconds
    pub elapsed_ms: u64,
}

impl BuildReport {
    /// Number of pages whose conversion failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Runs the conversion, index and feed steps for one site.
pub struct BuildPipeline {
    config: Config,
    options: BuildOptions,
    progress_callback: Option<ProgressCallback>,
}

impl BuildPipeline {
    /// Create a pipeline for `config`.
    #[must_use]
    pub fn new(config: Config, options: BuildOptions) -> Self {
        Self {
            config,
            options,
            progress_callback: None,
        }
    }

    /// Set progress callback.
    ///
    /// The callback receives `(completed, total)` after each page is
    /// converted, from worker threads.
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full build.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory is missing or unreadable, a
    /// configured selector is invalid, the worker pool cannot be started, or
    /// the index step aborts (missing template, missing base URL, write
    /// failure). An aborted index step still lets the search feed run before
    /// its error is returned. Individual page failures are reported, not
    /// returned.
    pub fn run(&self) -> Result<BuildReport> {
        let started = Instant::now();
        let storage = Storage::open(&self.config.site.output_dir)?;
        let pages = self.discover(&storage)?;

        let mut report = BuildReport {
            pages: pages.len(),
            ..BuildReport::default()
        };

        self.convert_pages(&storage, &pages, &mut report)?;
        // The feed reads HTML only, so it does not depend on the index step.
        let indexed = self.write_index(&storage, &pages, &mut report);

        if !self.options.skip_feed && self.config.feed.namespace.is_some() {
            report.feed_path = Some(self.write_feed_for(&pages)?);
        }
        indexed?;

        report.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            pages = report.pages,
            converted = report.converted,
            fresh = report.fresh,
            failed = report.failed(),
            elapsed_ms = report.elapsed_ms,
            "build finished"
        );
        Ok(report)
    }

    /// Discover pages and write only the search feed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no feed namespace is configured, and
    /// discovery or write errors otherwise.
    pub fn run_feed(&self) -> Result<PathBuf> {
        let storage = Storage::open(&self.config.site.output_dir)?;
        let pages = self.discover(&storage)?;
        self.write_feed_for(&pages)
    }

    fn discover(&self, storage: &Storage) -> Result<Vec<PageRecord>> {
        let mut pages = discover_pages(storage.root_dir(), &self.config.site.exclude)?;
        let before = pages.len();
        pages.retain(|page| page.source_path.is_file());
        if pages.len() < before {
            warn!(missing = before - pages.len(), "skipping pages without a source file");
        }
        info!(pages = pages.len(), "discovered pages");
        Ok(pages)
    }

    fn convert_pages(
        &self,
        storage: &Storage,
        pages: &[PageRecord],
        report: &mut BuildReport,
    ) -> Result<()> {
        let split = partition(pages, storage, self.options.force);
        report.fresh = split.fresh.len();
        if split.stale.is_empty() {
            info!(fresh = report.fresh, "all artifacts are up to date");
            return Ok(());
        }

        let artifact_paths: Vec<PathBuf> = split
            .stale
            .iter()
            .map(|page| storage.artifact_path(&page.url))
            .collect();
        storage.ensure_parent_dirs(artifact_paths.iter().map(PathBuf::as_path))?;

        let converter = HtmlConverter::new(&self.config.convert)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.convert.jobs)
            .build()
            .map_err(|e| Error::Other(format!("Failed to start conversion workers: {e}")))?;

        let total = split.stale.len();
        let completed = AtomicUsize::new(0);
        info!(stale = total, threads = pool.current_num_threads(), "converting pages");

        let results: Vec<std::result::Result<(), PageFailure>> = pool.install(|| {
            split
                .stale
                .par_iter()
                .map(|page| {
                    let result = convert_page(&converter, storage, page);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(callback) = &self.progress_callback {
                        callback(done, total);
                    }
                    result.map_err(|err| {
                        warn!(url = %page.url, error = %err, "conversion failed");
                        PageFailure {
                            url: page.url.clone(),
                            error: err.to_string(),
                        }
                    })
                })
                .collect()
        });

        for result in results {
            match result {
                Ok(()) => report.converted += 1,
                Err(failure) => report.failures.push(failure),
            }
        }
        Ok(())
    }

    fn write_index(
        &self,
        storage: &Storage,
        pages: &[PageRecord],
        report: &mut BuildReport,
    ) -> Result<()> {
        let site = &self.config.site;
        let template = match fs::read_to_string(&site.template) {
            Ok(template) => template,
            Err(err) => {
                error!(
                    template = %site.template.display(),
                    error = %err,
                    "template missing, index documents not generated"
                );
                return Err(Error::NotFound(format!(
                    "index template {}",
                    site.template.display()
                )));
            },
        };
        if site.base_url.trim().is_empty() {
            error!("site.base_url is not set, index documents not generated");
            return Err(Error::Config(
                "site.base_url must be set to generate index documents".to_string(),
            ));
        }

        let index: SectionIndex = pages
            .iter()
            .map(|page| section_entry(storage, page))
            .collect();
        report.indexed = index.len();

        let assembler = IndexAssembler::new(template, &site.base_url);
        report.summary_path =
            Some(storage.write_document(SUMMARY_FILE_NAME, &assembler.summary(&index))?);
        report.full_path = Some(storage.write_document(FULL_FILE_NAME, &assembler.full(&index))?);
        report.published_path = storage.publish_to_parent(SUMMARY_FILE_NAME)?;

        info!(entries = report.indexed, "wrote index documents");
        Ok(())
    }

    fn write_feed_for(&self, pages: &[PageRecord]) -> Result<PathBuf> {
        let namespace = self.config.feed.namespace.as_deref().ok_or_else(|| {
            Error::Config("feed.namespace must be set to generate the search feed".to_string())
        })?;
        let pruner = Pruner::from_config(&self.config.convert)?;
        let operations = build_feed(pages, namespace, &pruner);
        write_feed(&operations, &self.config.feed_output_dir(), namespace)
    }
}

fn convert_page(converter: &HtmlConverter, storage: &Storage, page: &PageRecord) -> Result<()> {
    let html = fs::read_to_string(&page.source_path)?;
    let markdown = converter.convert(&html);
    let path = storage.write_artifact(&page.url, &markdown)?;
    debug!(url = %page.url, path = %path.display(), "converted");
    Ok(())
}

/// Read a page's artifact back and describe it for the index.
///
/// A missing or unreadable artifact degrades to the URL-derived title.
fn section_entry(storage: &Storage, page: &PageRecord) -> SectionEntry {
    let (summary, content) = match storage.read_artifact(&page.url) {
        Ok(markdown) => (summarize_markdown(&markdown, &page.url), Some(markdown)),
        Err(err) => {
            warn!(url = %page.url, error = %err, "could not read artifact");
            let summary = PageSummary {
                title: fallback_title(&page.url),
                description: None,
            };
            (summary, None)
        },
    };

    SectionEntry {
        section: section_for_url(&page.url),
        title: summary.title,
        description: summary.description,
        url: page.url.clone(),
        content,
    }
}
