//! Recursive element-to-Markdown rendering.
//!
//! Block elements append their Markdown followed by a blank line, inline
//! elements append in place. Emphasis, headings, links and table cells use
//! the flattened text of the element, so markup nested inside them is
//! reduced to plain text.

use std::fmt::Write;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::table::render_table;

/// Number of ancestors (besides the element itself) searched for a
/// `language-*` class on code blocks.
const LANGUAGE_LOOKUP_DEPTH: usize = 3;

/// Render an element and its subtree as Markdown.
///
/// ```rust
/// use llmsgen_core::convert::render_element;
/// use scraper::{Html, Selector};
///
/// let doc = Html::parse_fragment("<p>Use <code>vespa deploy</code> <b>now</b>.</p>");
/// let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
/// assert_eq!(render_element(p), "Use `vespa deploy` **now**.\n\n");
/// ```
#[must_use]
pub fn render_element(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    render_element_into(element, &mut out);
    out
}

/// Render any node: text nodes collapse whitespace, elements recurse.
#[must_use]
pub fn render_node(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    render_node_into(node, &mut out);
    out
}

fn render_node_into(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_text(out, text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                render_element_into(element, out);
            }
        },
        Node::Document | Node::Fragment => render_children(node, out),
        _ => {},
    }
}

fn render_children(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        render_node_into(child, out);
    }
}

fn render_children_to_string(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    render_children(*element, &mut out);
    out
}

fn render_element_into(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            start_block(out);
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(&flat_text(element));
            out.push_str("\n\n");
        },
        "p" => {
            let inner = render_children_to_string(element);
            start_block(out);
            out.push_str(inner.trim());
            out.push_str("\n\n");
        },
        "br" => out.push('\n'),
        "strong" | "b" => push_wrapped(out, &flat_text(element), "**"),
        "em" | "i" => push_wrapped(out, &flat_text(element), "*"),
        "code" => {
            if parent_is_pre(element) {
                push_fenced(out, &raw_text(element), code_language(element).as_deref());
            } else {
                push_wrapped(out, raw_text(element).trim(), "`");
            }
        },
        "pre" => {
            let has_code_child = element
                .children()
                .filter_map(ElementRef::wrap)
                .any(|child| child.value().name() == "code");
            if has_code_child {
                render_children(*element, out);
            } else {
                push_fenced(out, &raw_text(element), code_language(element).as_deref());
            }
        },
        "a" => {
            let text = flat_text(element);
            let href = element.value().attr("href").map_or("", str::trim);
            if !href.is_empty() && href != text {
                let _ = write!(out, "[{text}]({href})");
            } else {
                out.push_str(&text);
            }
        },
        "img" => {
            let src = element.value().attr("src").map_or("", str::trim);
            if !src.is_empty() {
                let alt = element.value().attr("alt").unwrap_or("").trim();
                let _ = write!(out, "![{alt}]({src})");
            }
        },
        "ul" => render_list(element, false, out),
        "ol" => render_list(element, true, out),
        "li" => render_list_item(element, "- ", out),
        "blockquote" => {
            let inner = render_children_to_string(element);
            start_block(out);
            let quoted: Vec<String> = inner
                .trim()
                .split('\n')
                .map(|line| format!("> {line}"))
                .collect();
            out.push_str(&quoted.join("\n"));
            out.push_str("\n\n");
        },
        "hr" => {
            start_block(out);
            out.push_str("---\n\n");
        },
        "table" => render_table(element, out),
        _ => render_children(*element, out),
    }
}

fn render_list(list: ElementRef<'_>, ordered: bool, out: &mut String) {
    start_line(out);
    let mut counter = 0usize;
    for child in list.children() {
        match ElementRef::wrap(child) {
            Some(item) if item.value().name() == "li" => {
                counter += 1;
                let marker = if ordered {
                    format!("{counter}. ")
                } else {
                    "- ".to_string()
                };
                render_list_item(item, &marker, out);
            },
            Some(other) => render_element_into(other, out),
            None => {},
        }
    }
    out.push('\n');
}

fn render_list_item(item: ElementRef<'_>, marker: &str, out: &mut String) {
    let inner = render_children_to_string(item);
    let indent = " ".repeat(marker.len());

    start_line(out);
    out.push_str(marker);
    for (idx, line) in inner.trim().split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
    out.push('\n');
}

fn push_fenced(out: &mut String, code: &str, language: Option<&str>) {
    start_block(out);
    out.push_str("```");
    if let Some(language) = language {
        out.push_str(language);
    }
    out.push('\n');
    out.push_str(code);
    if !code.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```\n\n");
}

fn push_wrapped(out: &mut String, text: &str, marker: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(marker);
    out.push_str(text);
    out.push_str(marker);
}

/// Append a text node, collapsing whitespace runs.
///
/// Leading whitespace is dropped at the start of a line and never doubled.
fn push_text(out: &mut String, text: &str) {
    let collapsed = collapse_whitespace(text);
    let piece = if out.is_empty() || out.ends_with('\n') || out.ends_with(' ') {
        collapsed.trim_start()
    } else {
        collapsed.as_str()
    };
    out.push_str(piece);
}

/// Ensure the next block starts after a blank line.
pub(super) fn start_block(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str("\n\n");
    }
}

fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Collapse every run of whitespace into a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }
    collapsed
}

/// All descendant text, whitespace collapsed and trimmed.
pub(super) fn flat_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&raw_text(element)).trim().to_string()
}

fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn parent_is_pre(element: ElementRef<'_>) -> bool {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name() == "pre")
}

/// Language hint from a `language-<lang>` class on the element or an ancestor.
fn code_language(element: ElementRef<'_>) -> Option<String> {
    std::iter::once(*element)
        .chain(element.ancestors())
        .take(LANGUAGE_LOOKUP_DEPTH + 1)
        .filter_map(ElementRef::wrap)
        .find_map(|el| {
            el.value()
                .classes()
                .find_map(|class| class.strip_prefix("language-"))
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
        })
}
