//! Whitespace cleanup for rendered Markdown.

/// Newlines kept between two lines, and at the end of the document.
const MAX_NEWLINES: usize = 2;

/// Normalize rendered Markdown.
///
/// Outside fenced code blocks, trailing whitespace is stripped from every
/// line and runs of blank lines collapse to one. Lines inside a fence are
/// copied verbatim. Leading newlines are removed. The result is idempotent:
/// tidying tidy output returns it unchanged.
#[must_use]
pub fn tidy_markdown(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut in_fence = false;
    let mut blank_lines = 0usize;
    let mut started = false;

    for raw in markdown.split('\n') {
        let line = if in_fence && !is_fence(raw) {
            raw
        } else {
            raw.trim_end()
        };
        if line.is_empty() && !in_fence {
            blank_lines += 1;
            continue;
        }
        if is_fence(line) {
            in_fence = !in_fence;
        }

        if started {
            push_newlines(&mut out, blank_lines + 1);
        }
        out.push_str(line);
        blank_lines = 0;
        started = true;
    }

    if started {
        push_newlines(&mut out, blank_lines);
    }
    out
}

fn push_newlines(out: &mut String, count: usize) {
    for _ in 0..count.min(MAX_NEWLINES) {
        out.push('\n');
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}
