//! Assembler for the `llms.txt` and `llms-full.txt` index documents.
//!
//! Both documents start with the template preamble and list pages grouped by
//! section, in the order sections were first seen.
//!
//! ## Format
//!
//! The summary links every page to its Markdown artifact:
//!
//! ```markdown
//! ## Tutorials
//!
//! - [Start](https://docs.vespa.ai/en/tutorials/start.html.md): First sentence.
//! ```
//!
//! The full-content document embeds each page with its headings pushed down
//! to level 4 and a `---` rule between pages:
//!
//! ```markdown
//! ## Tutorials
//!
//! ### Start
//!
//! First sentence.
//!
//! #### Start
//!
//! First sentence. More text.
//!
//! ---
//! ```
//!
//! ## Example
//!
//! ```rust
//! use llmsgen_core::generate::{IndexAssembler, SectionEntry, SectionIndex};
//!
//! let mut index = SectionIndex::new();
//! index.push(SectionEntry {
//!     section: "Tutorials".to_string(),
//!     title: "Start".to_string(),
//!     description: Some("First sentence.".to_string()),
//!     url: "/en/tutorials/start.html".to_string(),
//!     content: None,
//! });
//!
//! let assembler = IndexAssembler::new("# Vespa\n", "https://docs.vespa.ai/");
//! let summary = assembler.summary(&index);
//! assert!(summary.contains(
//!     "- [Start](https://docs.vespa.ai/en/tutorials/start.html.md): First sentence.\n"
//! ));
//! ```

use std::collections::HashMap;

use super::headings::shift_headings;
use crate::paths::markdown_url_suffix;

/// Heading level the shallowest heading of an embedded page is moved to.
pub const FULL_CONTENT_HEADING_LEVEL: usize = 4;

/// Section excluded from both documents.
const NOT_FOUND_SECTION: &str = "404";

/// Title prefix of redirect stub pages.
const REDIRECT_TITLE_PREFIX: &str = "Redirect";

/// Index metadata for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    /// Display section the page is grouped under
    pub section: String,
    /// Page title
    pub title: String,
    /// One-sentence description
    pub description: Option<String>,
    /// Site-relative page URL
    pub url: String,
    /// Page Markdown, present when building the full-content document
    pub content: Option<String>,
}

/// Section entries grouped by section, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: Vec<(String, Vec<SectionEntry>)>,
    positions: HashMap<String, usize>,
}

impl SectionIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its section, creating the section on first use.
    pub fn push(&mut self, entry: SectionEntry) {
        if let Some(&idx) = self.positions.get(&entry.section) {
            self.sections[idx].1.push(entry);
        } else {
            self.positions
                .insert(entry.section.clone(), self.sections.len());
            self.sections.push((entry.section.clone(), vec![entry]));
        }
    }

    /// Sections with their entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SectionEntry])> {
        self.sections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Total number of entries across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Whether no entries have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<SectionEntry> for SectionIndex {
    fn from_iter<I: IntoIterator<Item = SectionEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.push(entry);
        }
        index
    }
}

/// Builds the two index documents from a [`SectionIndex`].
#[derive(Debug, Clone)]
pub struct IndexAssembler {
    template: String,
    base_url: String,
}

impl IndexAssembler {
    /// Create an assembler for a template preamble and public base URL.
    ///
    /// A trailing slash on `base_url` is dropped so page URLs can be appended
    /// directly.
    #[must_use]
    pub fn new(template: impl Into<String>, base_url: &str) -> Self {
        Self {
            template: template.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Render `llms.txt`: the preamble followed by one link per page.
    #[must_use]
    pub fn summary(&self, index: &SectionIndex) -> String {
        let mut out = self.preamble();
        for (section, entries) in visible_sections(index) {
            push_section_header(&mut out, section);
            for entry in entries {
                out.push_str(&format!(
                    "- [{}]({}{}{})",
                    entry.title,
                    self.base_url,
                    entry.url,
                    markdown_url_suffix(&entry.url)
                ));
                if let Some(description) = &entry.description {
                    out.push_str(": ");
                    out.push_str(description);
                }
                out.push('\n');
            }
        }
        out
    }

    /// Render `llms-full.txt`: the preamble followed by every page's content.
    #[must_use]
    pub fn full(&self, index: &SectionIndex) -> String {
        let mut out = self.preamble();
        for (section, entries) in visible_sections(index) {
            push_section_header(&mut out, section);
            for entry in entries {
                out.push_str("### ");
                out.push_str(&entry.title);
                out.push_str("\n\n");
                if let Some(description) = &entry.description {
                    out.push_str(description);
                    out.push_str("\n\n");
                }
                let content = entry.content.as_deref().unwrap_or_default().trim();
                if !content.is_empty() {
                    out.push_str(&shift_headings(content, FULL_CONTENT_HEADING_LEVEL));
                    out.push_str("\n\n");
                }
                out.push_str("---\n\n");
            }
        }
        out
    }

    fn preamble(&self) -> String {
        let mut out = self.template.trim_end().to_string();
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn push_section_header(out: &mut String, section: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("## ");
    out.push_str(section);
    out.push_str("\n\n");
}

/// Sections with the 404 section, redirect stubs and emptied sections removed.
fn visible_sections(index: &SectionIndex) -> impl Iterator<Item = (&str, Vec<&SectionEntry>)> {
    index
        .iter()
        .filter(|(section, _)| *section != NOT_FOUND_SECTION)
        .map(|(section, entries)| {
            let kept: Vec<&SectionEntry> = entries
                .iter()
                .filter(|entry| !entry.title.starts_with(REDIRECT_TITLE_PREFIX))
                .collect();
            (section, kept)
        })
        .filter(|(_, kept)| !kept.is_empty())
}
