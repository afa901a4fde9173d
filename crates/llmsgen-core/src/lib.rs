//! # llmsgen-core
//!
//! Core functionality for llmsgen - turns a rendered documentation site into
//! Markdown and `llms.txt` index documents.
//!
//! This crate converts every HTML page of a static-site build into a Markdown
//! artifact next to it, then summarizes the artifacts into a linked table of
//! contents (`llms.txt`) and a full-content concatenation (`llms-full.txt`)
//! for language-model consumption. It can also emit a JSON feed for a
//! document search engine.
//!
//! ## Architecture
//!
//! The crate is organized around several key components:
//!
//! - **Conversion**: DOM pruning and recursive Markdown rendering ([`convert`])
//! - **Paths**: URL to artifact path mapping ([`paths`])
//! - **Sections**: section names, titles and descriptions ([`section`])
//! - **Generation**: assembly of the two index documents ([`generate`])
//! - **Pipeline**: discovery, staleness, parallel conversion ([`pipeline`])
//! - **Feed**: search feed operations ([`feed`])
//! - **Error Handling**: one error enum with categories ([`error`])
//!
//! ## Quick Start
//!
//! ```rust
//! use llmsgen_core::{Config, HtmlConverter};
//!
//! let config = Config::default();
//! let converter = HtmlConverter::new(&config.convert)?;
//! let markdown = converter.convert("<main><h1>Hello</h1><p>World.</p></main>");
//! assert_eq!(markdown, "# Hello\n\nWorld.\n\n");
//! # Ok::<(), llmsgen_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`]. Per-page problems
//! degrade instead of failing the build; see [`pipeline`] for which errors
//! abort a step.

/// Build configuration loaded from `llmsgen.toml`
pub mod config;
/// HTML to Markdown conversion
pub mod convert;
/// Error types and result aliases
pub mod error;
/// Search feed generation
pub mod feed;
/// Index document assembly
pub mod generate;
/// Discovery of rendered pages
pub mod pages;
/// URL to artifact path mapping
pub mod paths;
/// End-to-end build pipeline
pub mod pipeline;
/// Section classification and page summaries
pub mod section;
/// Modification-time staleness checks
pub mod staleness;
/// Atomic filesystem writes into the build output
pub mod storage;

// Re-export commonly used types
pub use config::{Config, ConvertConfig, FeedConfig, SiteConfig};
pub use convert::HtmlConverter;
pub use error::{Error, Result};
pub use feed::{FeedFields, FeedOperation};
pub use generate::{IndexAssembler, SectionEntry, SectionIndex};
pub use pages::PageRecord;
pub use pipeline::{BuildOptions, BuildPipeline, BuildReport, PageFailure, ProgressCallback};
pub use storage::Storage;
