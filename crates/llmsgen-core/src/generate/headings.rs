//! Heading-level renumbering for embedded page content.

/// Deepest Markdown heading level.
const MAX_LEVEL: usize = 6;

/// Shift every ATX heading so the shallowest one lands on `target`.
///
/// Relative nesting is kept and levels are clamped to `1..=6`. Lines inside
/// fenced code blocks are never treated as headings. Content whose minimum
/// level already equals `target`, or that has no headings, is returned
/// unchanged.
///
/// ```rust
/// use llmsgen_core::generate::shift_headings;
///
/// let shifted = shift_headings("# Title\n\n## Part\n\ntext\n", 4);
/// assert_eq!(shifted, "#### Title\n\n##### Part\n\ntext\n");
/// ```
#[must_use]
pub fn shift_headings(markdown: &str, target: usize) -> String {
    let target = target.clamp(1, MAX_LEVEL);
    let Some(min_level) = heading_lines(markdown).map(|(_, level)| level).min() else {
        return markdown.to_string();
    };
    if min_level == target {
        return markdown.to_string();
    }

    let mut shifted = String::with_capacity(markdown.len() + 16);
    let mut in_fence = false;
    for line in markdown.split_inclusive('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
        }
        match heading_level(line).filter(|_| !in_fence) {
            Some(level) => {
                let new_level = (level + target).saturating_sub(min_level).clamp(1, MAX_LEVEL);
                shifted.push_str(&"#".repeat(new_level));
                shifted.push_str(&line[level..]);
            },
            None => shifted.push_str(line),
        }
    }
    shifted
}

/// Heading lines outside code fences with their levels.
fn heading_lines(markdown: &str) -> impl Iterator<Item = (&str, usize)> {
    let mut in_fence = false;
    markdown.lines().filter_map(move |line| {
        if is_fence(line) {
            in_fence = !in_fence;
            return None;
        }
        if in_fence {
            return None;
        }
        heading_level(line).map(|level| (line, level))
    })
}

/// Level of an ATX heading line: 1-6 `#` followed by whitespace.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=MAX_LEVEL).contains(&level) {
        return None;
    }
    line[level..]
        .starts_with(|c: char| c.is_whitespace())
        .then_some(level)
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}
