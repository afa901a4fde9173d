//! Pipe-table rendering.

use scraper::ElementRef;

use super::render::{flat_text, start_block};

/// Append a table as a Markdown pipe table.
///
/// Rows are taken from every descendant `tr` in document order, so `thead`,
/// `tbody` and `tfoot` sections are merged. When the first row contains a
/// header cell a separator row follows it. Cells are flattened to plain text
/// with `|` escaped. Column counts are not normalized.
pub(super) fn render_table(table: ElementRef<'_>, out: &mut String) {
    let rows: Vec<(Vec<String>, bool)> = table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .map(row_cells)
        .collect();

    if rows.is_empty() {
        return;
    }

    start_block(out);
    for (idx, (cells, has_header)) in rows.iter().enumerate() {
        push_row(out, cells);
        if idx == 0 && *has_header {
            let separator = vec!["---".to_string(); cells.len()];
            push_row(out, &separator);
        }
    }
    out.push('\n');
}

fn row_cells(row: ElementRef<'_>) -> (Vec<String>, bool) {
    let mut has_header = false;
    let cells: Vec<String> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| match cell.value().name() {
            "th" => {
                has_header = true;
                true
            },
            "td" => true,
            _ => false,
        })
        .map(|cell| flat_text(cell).replace('|', "\\|"))
        .collect();
    (cells, has_header)
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}
