//! Error types and handling for llmsgen-core operations.
//!
//! Every fallible operation in the library returns [`Result<T>`], whose error
//! side is the single [`Error`] enum below. Errors carry a category string for
//! structured logging:
//!
//! ```rust
//! use llmsgen_core::{Error, Result};
//!
//! fn run() -> Result<()> {
//!     Err(Error::NotFound("llms-template.md".to_string()))
//! }
//!
//! match run() {
//!     Err(e) => assert_eq!(e.category(), "not_found"),
//!     Ok(()) => unreachable!(),
//! }
//! ```
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading rendered HTML, writing artifacts and index documents
//! - **Parse Errors**: invalid CSS selectors
//! - **Configuration Errors**: malformed `llmsgen.toml`, invalid values
//! - **Serialization Errors**: encoding the JSON search feed
//! - **Storage Errors**: writing artifacts and index documents to the output
//!
//! Most per-page failures never surface as an [`Error`]: the pipeline filters
//! missing pages out up front and degrades title extraction to a URL-derived
//! fallback. The errors that do reach a caller are the ones that abort a step,
//! such as a missing template for the index documents.

use thiserror::Error;

/// The main error type for llmsgen-core operations.
///
/// `Display` gives a short user-facing message; the wrapped `std::io::Error`
/// is preserved as the error source.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading rendered HTML, walking the build output directory and
    /// writing artifacts. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing operation failed.
    ///
    /// ## Common Causes
    ///
    /// - Invalid CSS selector in the `[convert]` configuration
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in `llmsgen.toml`
    /// - A configuration file given explicitly that does not exist
    /// - Empty base URL when index documents are requested
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for the missing `llms-template.md` and a missing build output
    /// directory.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing to the build output failed.
    ///
    /// Carries the path and operation that failed, for example an artifact
    /// whose temporary file could not be renamed into place.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => Self::Io(io),
            None => Self::Other("filesystem loop detected while walking output".to_string()),
        }
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// Returns a static string for logging fields and metrics:
    ///
    /// - `"io"`, `"parse"`, `"config"`, `"not_found"`, `"serialization"`,
    ///   `"storage"`, `"other"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
            Self::Storage(_) => "storage",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
