//! Content-container selection and chrome removal.
//!
//! The pruner works directly on the parsed `scraper::Html` tree: it picks the
//! content container, detaches page chrome below it, and drops everything
//! that precedes the first `h1` so the rendered page starts at its title.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::config::ConvertConfig;
use crate::{Error, Result};

/// Prunes a parsed document down to its main content.
///
/// Selectors are compiled once and the pruner is shared read-only between
/// conversion workers.
#[derive(Debug)]
pub struct Pruner {
    containers: Vec<Selector>,
    body: Selector,
    remove: Vec<Selector>,
    heading: Selector,
}

impl Pruner {
    /// Build a pruner from container and removal selector lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] naming the first selector that fails to parse.
    pub fn new<S: AsRef<str>>(content_selectors: &[S], remove_selectors: &[S]) -> Result<Self> {
        Ok(Self {
            containers: content_selectors
                .iter()
                .map(|s| parse_selector(s.as_ref()))
                .collect::<Result<_>>()?,
            body: parse_selector("body")?,
            remove: remove_selectors
                .iter()
                .map(|s| parse_selector(s.as_ref()))
                .collect::<Result<_>>()?,
            heading: parse_selector("h1")?,
        })
    }

    /// Build a pruner from the `[convert]` configuration table.
    pub fn from_config(config: &ConvertConfig) -> Result<Self> {
        Self::new(
            config.content_selectors.as_slice(),
            config.remove_selectors.as_slice(),
        )
    }

    /// Prune `document` in place and return the content container.
    ///
    /// Returns `None` when the document has neither a preferred container nor
    /// a `body`. The tree is mutated: removed nodes are detached, so the
    /// original document must not be rendered afterwards.
    pub fn prune(&self, document: &mut Html) -> Option<NodeId> {
        let container = self.strip_chrome(document)?;

        let heading = {
            let root = ElementRef::wrap(document.tree.get(container)?)?;
            root.select(&self.heading).next().map(|h| h.id())
        };
        if let Some(heading) = heading {
            truncate_before(document, container, heading);
        }

        Some(container)
    }

    /// Find the content container and detach the chrome below it.
    ///
    /// Unlike [`Pruner::prune`], content before the first `h1` is kept.
    pub fn strip_chrome(&self, document: &mut Html) -> Option<NodeId> {
        let container = self.find_container(document)?;

        let doomed: Vec<NodeId> = {
            let root = ElementRef::wrap(document.tree.get(container)?)?;
            root.descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|el| self.remove.iter().any(|selector| selector.matches(el)))
                .map(|el| el.id())
                .collect()
        };
        detach_all(document, &doomed);
        Some(container)
    }

    fn find_container(&self, document: &Html) -> Option<NodeId> {
        self.containers
            .iter()
            .chain(std::iter::once(&self.body))
            .find_map(|selector| document.select(selector).next())
            .map(|el| el.id())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Parse(format!("invalid CSS selector '{selector}': {e:?}")))
}

/// Detach every preceding sibling of `start` and of each of its ancestors,
/// stopping once the container's direct children have been handled.
fn truncate_before(document: &mut Html, container: NodeId, start: NodeId) {
    let mut current = start;
    loop {
        let Some(node) = document.tree.get(current) else {
            return;
        };
        let preceding: Vec<NodeId> = node.prev_siblings().map(|s| s.id()).collect();
        let parent = node.parent().map(|p| p.id());

        detach_all(document, &preceding);

        match parent {
            Some(parent) if parent != container => current = parent,
            _ => return,
        }
    }
}

fn detach_all(document: &mut Html, ids: &[NodeId]) {
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }
}
