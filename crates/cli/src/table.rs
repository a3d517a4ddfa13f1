//! Plain-text rendering of grids for the terminal.

use potgrid_engine::{Cell, EditabilityMask, Grid, Layout};
use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .next()
            .filter(|&ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) <= width)
            .map(String::from)
            .unwrap_or_default();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            end_byte = i;
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let w = display_width(&cut);
    format!("{}{}", cut, " ".repeat(width.saturating_sub(w)))
}

/// Render `grid` spreadsheet-style: column ids across the top, 1-based row
/// numbers down the side, each column as wide as its widest cell (capped at
/// `max_width`).
pub fn render_grid(grid: &Grid<Cell>, layout: &Layout, max_width: usize) -> String {
    let texts: Vec<Vec<String>> = grid
        .iter_rows()
        .map(|row| row.iter().map(Cell::display).collect())
        .collect();
    let mut widths: Vec<usize> = layout.column_ids.iter().map(|id| display_width(id)).collect();
    for row in &texts {
        for (w, text) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(text)).min(max_width.max(1));
        }
    }
    render_rows(&layout.column_ids, &texts, &widths)
}

/// Render the lock mask with one symbol per cell.
pub fn render_mask(mask: &EditabilityMask, layout: &Layout) -> String {
    let texts: Vec<Vec<String>> = mask
        .iter_rows()
        .map(|row| row.iter().map(|lock| lock.symbol().to_string()).collect())
        .collect();
    let widths: Vec<usize> = layout.column_ids.iter().map(|id| display_width(id)).collect();
    render_rows(&layout.column_ids, &texts, &widths)
}

fn render_rows(ids: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
    let gutter = rows.len().to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(gutter));
    for (id, &w) in ids.iter().zip(widths) {
        out.push_str("  ");
        out.push_str(&pad_right(id, w));
    }
    push_line_end(&mut out);

    for (r, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>gutter$}", r + 1));
        for (text, &w) in row.iter().zip(widths) {
            out.push_str("  ");
            out.push_str(&pad_right(text, w));
        }
        push_line_end(&mut out);
    }
    out
}

fn push_line_end(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}
