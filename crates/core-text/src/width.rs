//! Display width helpers.
//!
//! All rendered-column decisions flow through `char_width` so the compositor and
//! the whitespace helpers agree on tab expansion and wide glyphs.
//!
//! Invariants:
//! - Tabs advance to the next multiple of `tab_size` (minimum 1).
//! - Control chars other than tab occupy one cell (rendered as a placeholder by callers).
//! - Wide (CJK / emoji) chars occupy two cells.

use unicode_width::UnicodeWidthChar;

/// Width in terminal cells of `c` when it starts at rendered column `col`.
pub fn char_width(c: char, col: usize, tab_size: usize) -> usize {
    if c == '\t' {
        let tab = tab_size.max(1);
        return tab - (col % tab);
    }
    UnicodeWidthChar::width(c).unwrap_or(1).max(1)
}

/// Rendered column reached after the first `col` chars of `line`.
pub fn rendered_col(line: &str, col: usize, tab_size: usize) -> usize {
    line.chars()
        .take(col)
        .fold(0, |acc, c| acc + char_width(c, acc, tab_size))
}

/// Leading run of spaces and tabs.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}
