//! Configuration for a documentation build.
//!
//! Configuration is stored in TOML (`llmsgen.toml` next to the site sources)
//! and every field has a default, so a missing file simply means defaults.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [site]
//! base_url = "https://docs.vespa.ai"
//! output_dir = "_site"
//! template = "llms-template.md"
//! exclude = ["/css/", "/redirects.json"]
//!
//! [convert]
//! jobs = 0
//!
//! [feed]
//! namespace = "open"
//! ```
//!
//! ## Loading
//!
//! ```rust
//! use llmsgen_core::Config;
//!
//! let config = Config::from_toml_str("[site]\nbase_url = \"https://docs.example.com\"\n")?;
//! assert_eq!(config.site.base_url, "https://docs.example.com");
//! assert_eq!(config.site.output_dir.to_str(), Some("_site"));
//! # Ok::<(), llmsgen_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "llmsgen.toml";

/// Containers tried in order when picking the content root of a page.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &["main", ".content", "article", "#content"];

/// Page chrome removed from the content root before rendering.
pub const DEFAULT_REMOVE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "template",
    "noscript",
    "nav",
    "header",
    "footer",
    "aside",
    "[class*=\"sidebar\"]",
    "[id*=\"sidebar\"]",
    "[class*=\"toc\"]",
    "[id*=\"toc\"]",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout and index settings
    pub site: SiteConfig,
    /// HTML to Markdown conversion settings
    pub convert: ConvertConfig,
    /// Search feed settings
    pub feed: FeedConfig,
}

/// Where the rendered site lives and how index documents link to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL prepended to page links in `llms.txt`.
    ///
    /// A trailing slash is ignored.
    pub base_url: String,

    /// Build output directory containing the rendered HTML.
    ///
    /// Artifacts and index documents are written here; `llms.txt` is also
    /// copied to its parent directory.
    pub output_dir: PathBuf,

    /// Preamble template for both index documents.
    pub template: PathBuf,

    /// URL prefixes that are never converted or indexed.
    pub exclude: Vec<String>,
}

/// Controls the DOM pruner and the conversion worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// CSS selectors tried in order to find the content container.
    ///
    /// `body` is always the final fallback.
    pub content_selectors: Vec<String>,

    /// CSS selectors for elements removed from the content container.
    pub remove_selectors: Vec<String>,

    /// Number of conversion worker threads; `0` lets the pool decide.
    pub jobs: usize,
}

/// Search feed generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Document namespace; the feed is only generated when this is set.
    pub namespace: Option<String>,

    /// Directory for `<namespace>_index.json`.
    ///
    /// Defaults to the parent of the site output directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            output_dir: PathBuf::from("_site"),
            template: PathBuf::from("llms-template.md"),
            exclude: Vec::new(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            remove_selectors: DEFAULT_REMOVE_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            jobs: 0,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`CONFIG_FILE_NAME`] in the
    /// working directory is used when present, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The explicit config file does not exist
    /// - The config file cannot be read
    /// - The config file contains invalid TOML or invalid values
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            },
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Directory the search feed is written to.
    #[must_use]
    pub fn feed_output_dir(&self) -> PathBuf {
        self.feed.output_dir.clone().unwrap_or_else(|| {
            self.site
                .output_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }

    fn validate(&self) -> Result<()> {
        if let Some(namespace) = &self.feed.namespace {
            if namespace.trim().is_empty() || namespace.contains(':') {
                return Err(Error::Config(format!(
                    "Invalid feed namespace '{namespace}': must be non-empty and must not contain ':'"
                )));
            }
        }

        if self.site.exclude.iter().any(|prefix| !prefix.starts_with('/')) {
            return Err(Error::Config(
                "site.exclude entries must be site-relative URL prefixes starting with '/'"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
