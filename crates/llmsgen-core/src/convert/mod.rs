//! HTML to Markdown conversion.
//!
//! Conversion runs in three stages over a single parsed document:
//!
//! 1. [`Pruner`] picks the content container and strips page chrome
//! 2. the renderer walks the pruned subtree and emits Markdown
//! 3. [`tidy_markdown`] normalizes blank lines and trailing whitespace
//!
//! ```rust
//! use llmsgen_core::config::ConvertConfig;
//! use llmsgen_core::HtmlConverter;
//!
//! let converter = HtmlConverter::new(&ConvertConfig::default())?;
//! let markdown = converter.convert(
//!     "<body><nav>menu</nav><main><h1>Start</h1><p>First sentence. More text.</p></main></body>",
//! );
//! assert_eq!(markdown, "# Start\n\nFirst sentence. More text.\n\n");
//! # Ok::<(), llmsgen_core::Error>(())
//! ```

mod prune;
mod render;
mod table;
mod tidy;

pub use prune::Pruner;
pub use render::{collapse_whitespace, render_element, render_node};
pub use tidy::tidy_markdown;

use scraper::{ElementRef, Html};
use tracing::trace;

use crate::Result;
use crate::config::ConvertConfig;

/// Converts rendered HTML pages to Markdown.
///
/// The converter holds only compiled selectors, so one instance is shared by
/// every conversion worker.
#[derive(Debug)]
pub struct HtmlConverter {
    pruner: Pruner,
}

impl HtmlConverter {
    /// Create a converter from the `[convert]` configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] if a configured selector is invalid.
    pub fn new(config: &ConvertConfig) -> Result<Self> {
        Ok(Self {
            pruner: Pruner::from_config(config)?,
        })
    }

    /// Convert a full HTML document to tidy Markdown.
    ///
    /// A document without any content container yields an empty string.
    #[must_use]
    pub fn convert(&self, html: &str) -> String {
        let mut document = Html::parse_document(html);
        let Some(container) = self.pruner.prune(&mut document) else {
            trace!("no content container found");
            return String::new();
        };

        let rendered = document
            .tree
            .get(container)
            .and_then(ElementRef::wrap)
            .map(render_element)
            .unwrap_or_default();

        tidy_markdown(&rendered)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn converter() -> HtmlConverter {
        HtmlConverter::new(&ConvertConfig::default()).unwrap()
    }

    #[test]
    fn test_end_to_end_page() {
        let md = converter().convert(
            "<html><head><title>Start</title></head><body><main><h1>Start</h1><p>First sentence. More text.</p></main></body></html>",
        );
        assert_eq!(md, "# Start\n\nFirst sentence. More text.\n\n");
    }

    #[test]
    fn test_chrome_and_preamble_dropped() {
        let md = converter().convert(
            r#"<body>
                <header><a href="/">Home</a></header>
                <div class="content">
                  <div class="breadcrumbs"><a href="/en/">Docs</a></div>
                  <h1>Schemas</h1>
                  <div id="toc-box">On this page</div>
                  <p>A schema defines
                     a document type.</p>
                  <h2>Fields</h2>
                  <table>
                    <tr><th>Name</th><th>Type</th></tr>
                    <tr><td>title</td><td>string</td></tr>
                  </table>
                  <script>track()</script>
                </div>
                <footer>Copyright</footer>
              </body>"#,
        );

        assert_eq!(
            md,
            "# Schemas\n\nA schema defines a document type.\n\n## Fields\n\n| Name | Type |\n| --- | --- |\n| title | string |\n\n"
        );
    }

    #[test]
    fn test_code_block_survives_tidy() {
        let md = converter().convert(
            "<main><h1>Deploy</h1><pre><code class=\"language-sh\">vespa deploy --wait 300\n</code></pre></main>",
        );
        assert_eq!(md, "# Deploy\n\n```sh\nvespa deploy --wait 300\n```\n\n");
    }

    #[test]
    fn test_code_block_blank_lines_and_trailing_spaces_kept() {
        let md = converter().convert(
            "<main><h1>P</h1><pre><code>def a():\n    pass\n\n\ndef b():  \n    pass\n</code></pre></main>",
        );
        assert_eq!(
            md,
            "# P\n\n```\ndef a():\n    pass\n\n\ndef b():  \n    pass\n```\n\n"
        );
    }

    #[test]
    fn test_body_fallback_without_heading() {
        let md = converter().convert("<body><p>just text</p></body>");
        assert_eq!(md, "just text\n\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(converter().convert(""), "");
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let config = ConvertConfig {
            content_selectors: vec!["main[".to_string()],
            ..ConvertConfig::default()
        };
        let err = HtmlConverter::new(&config).unwrap_err();
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HtmlConverter>();
    }
}
