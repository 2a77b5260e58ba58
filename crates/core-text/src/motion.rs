//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor state
//! (no selection, no viewport). Every helper leaves the position inside the buffer
//! provided it started inside.

use crate::{Buffer, Position};

/// Move left one char; at column 0 wraps to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.col > 0 {
        pos.col -= 1;
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.col = buf.line_len(pos.line);
    }
}

/// Move right one char; at end of line wraps to the start of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if pos.col < buf.line_len(pos.line) {
        pos.col += 1;
    } else if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        pos.col = 0;
    }
}

/// Move up one line, clamping the column to the target line length.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.line == 0 {
        pos.col = 0;
        return;
    }
    pos.line -= 1;
    pos.col = pos.col.min(buf.line_len(pos.line));
}

/// Move down one line, clamping the column to the target line length.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.line + 1 >= buf.line_count() {
        pos.col = buf.line_len(pos.line);
        return;
    }
    pos.line += 1;
    pos.col = pos.col.min(buf.line_len(pos.line));
}

pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.col = 0;
}

/// Move to end of line (after last char).
pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.line);
}

pub fn document_start(_buf: &Buffer, pos: &mut Position) {
    *pos = Position::origin();
}

pub fn document_end(buf: &Buffer, pos: &mut Position) {
    *pos = buf.end_position();
}

/// Move `rows` lines up (clamped at the first line).
pub fn page_up(buf: &Buffer, pos: &mut Position, rows: usize) {
    pos.line = pos.line.saturating_sub(rows.max(1));
    pos.col = pos.col.min(buf.line_len(pos.line));
}

/// Move `rows` lines down (clamped at the last line).
pub fn page_down(buf: &Buffer, pos: &mut Position, rows: usize) {
    let last = buf.line_count() - 1;
    pos.line = (pos.line + rows.max(1)).min(last);
    pos.col = pos.col.min(buf.line_len(pos.line));
}

/// Word chars: alphanumeric or underscore.
pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Move to the start of the previous word. Crosses line boundaries; a line start
/// counts as a stop so the cursor never skips an empty line.
pub fn word_left(buf: &Buffer, pos: &mut Position) {
    if pos.col == 0 {
        left(buf, pos);
        return;
    }
    let chars: Vec<char> = buf.line(pos.line).unwrap_or_default().chars().collect();
    let mut col = pos.col.min(chars.len());
    while col > 0 && !is_word_char(chars[col - 1]) {
        col -= 1;
    }
    while col > 0 && is_word_char(chars[col - 1]) {
        col -= 1;
    }
    pos.col = col;
}

/// Move to the end of the next word. At end of line wraps to the next line start.
pub fn word_right(buf: &Buffer, pos: &mut Position) {
    let len = buf.line_len(pos.line);
    if pos.col >= len {
        right(buf, pos);
        return;
    }
    let chars: Vec<char> = buf.line(pos.line).unwrap_or_default().chars().collect();
    let mut col = pos.col;
    while col < len && !is_word_char(chars[col]) {
        col += 1;
    }
    while col < len && is_word_char(chars[col]) {
        col += 1;
    }
    pos.col = col;
}
