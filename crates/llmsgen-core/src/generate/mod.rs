//! Index document generation.
//!
//! Turns per-page section entries into the two documents published next to
//! the site:
//!
//! - `llms.txt`: the template preamble and a linked list of pages per section
//! - `llms-full.txt`: the same grouping with every page's Markdown embedded
//!
//! ## Key Types
//!
//! - [`SectionEntry`]: title, description and URL of one page
//! - [`SectionIndex`]: entries grouped by section in first-seen order
//! - [`IndexAssembler`]: renders both documents
//!
//! Embedded pages are renumbered with [`shift_headings`] so they nest below
//! the section and page headings of the full-content document.

mod assembler;
mod headings;

pub use assembler::{FULL_CONTENT_HEADING_LEVEL, IndexAssembler, SectionEntry, SectionIndex};
pub use headings::shift_headings;

/// File name of the summary document.
pub const SUMMARY_FILE_NAME: &str = "llms.txt";

/// File name of the full-content document.
pub const FULL_FILE_NAME: &str = "llms-full.txt";
