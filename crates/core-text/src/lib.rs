//! Rope-based text buffer abstraction.
//!
//! Coordinates:
//! * A `Position` is `(line, col)` where `col` is a raw character offset into the
//!   logical line, never a rendered (tab-expanded) column.
//! * Only `\n` terminates a line. A buffer ending with `\n` therefore exposes a
//!   final empty line, which is a valid cursor target.
//! * `col == line_len(line)` is valid and means "after the last character".
//!
//! Mutation helpers take positions by `&mut` when they move the caller's cursor
//! (insert/backspace) so callers never have to recompute the post-edit location.

use anyhow::Result;
use ropey::Rope;
use std::fmt;

pub mod motion;
pub mod width;

pub use width::{char_width, rendered_col};

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// A position inside a buffer expressed as (line index, char offset within that line).
///
/// Ordering is lexicographic by `(line, col)`; the derived `Ord` relies on field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub const fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    /// True when the position addresses an existing line and a column no greater
    /// than that line's length.
    pub fn is_within(&self, buffer: &Buffer) -> bool {
        self.line < buffer.line_count() && self.col <= buffer.line_len(self.line)
    }

    /// Clamp into the buffer: last line at most, column at most the line length.
    pub fn clamp_to(&mut self, buffer: &Buffer) {
        let count = buffer.line_count();
        if self.line >= count {
            self.line = count.saturating_sub(1);
        }
        let max = buffer.line_len(self.line);
        if self.col > max {
            self.col = max;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line + 1, self.col + 1)
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice. CRLF pairs are folded to LF.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let rope = if content.contains('\r') {
            Rope::from_str(&content.replace("\r\n", "\n"))
        } else {
            Rope::from_str(content)
        };
        Ok(Self {
            rope,
            name: name.into(),
        })
    }

    /// Empty, unnamed buffer (one empty line).
    pub fn empty() -> Self {
        Self {
            rope: Rope::new(),
            name: String::new(),
        }
    }

    /// Total number of lines in the buffer (always >= 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of a line in chars, excluding the terminating newline. Out of range -> 0.
    pub fn line_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Return the requested line as an owned `String` without its trailing newline.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Total size of the text in bytes (UTF-8).
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whole content as a `String`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Last addressable position (end of the last line).
    pub fn end_position(&self) -> Position {
        let last = self.line_count() - 1;
        Position::new(last, self.line_len(last))
    }

    /// Absolute char index of a position. Column is clamped to the line length so a
    /// stale position never indexes into the following line.
    pub fn char_index(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count() - 1);
        self.rope.line_to_char(line) + pos.col.min(self.line_len(line))
    }

    /// Inverse of `char_index`.
    pub fn position_of(&self, char_idx: usize) -> Position {
        let idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    /// Character at a position (None at end of line / past the end).
    pub fn char_at(&self, pos: Position) -> Option<char> {
        if pos.line >= self.line_count() || pos.col >= self.line_len(pos.line) {
            return None;
        }
        Some(self.rope.char(self.char_index(pos)))
    }

    /// Insert `text` at `pos`; `pos` advances to the end of the inserted text.
    pub fn insert(&mut self, pos: &mut Position, text: &str) {
        let idx = self.char_index(*pos);
        self.rope.insert(idx, text);
        *pos = self.position_of(idx + text.chars().count());
    }

    pub fn insert_char(&mut self, pos: &mut Position, ch: char) {
        let idx = self.char_index(*pos);
        self.rope.insert_char(idx, ch);
        *pos = self.position_of(idx + 1);
    }

    /// Split the current line at `pos`; cursor moves to the start of the new line.
    pub fn insert_newline(&mut self, pos: &mut Position) {
        self.insert_char(pos, '\n');
    }

    /// Delete the char before the position (backspace). At column 0 joins with the
    /// previous line. Returns false when nothing was removed (document start).
    pub fn delete_char_before(&mut self, pos: &mut Position) -> bool {
        let idx = self.char_index(*pos);
        if idx == 0 {
            return false;
        }
        self.rope.remove(idx - 1..idx);
        *pos = self.position_of(idx - 1);
        true
    }

    /// Delete the char at the position (forward delete). At end of line joins the next
    /// line. Returns false at document end.
    pub fn delete_char_at(&mut self, pos: Position) -> bool {
        let idx = self.char_index(pos);
        if idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(idx..idx + 1);
        true
    }

    /// Text between two positions (`[start,end)`, order-insensitive).
    pub fn slice(&self, a: Position, b: Position) -> String {
        let (s, e) = self.ordered_indices(a, b);
        self.rope.slice(s..e).to_string()
    }

    /// Remove the text between two positions, returning it.
    pub fn delete_range(&mut self, a: Position, b: Position) -> String {
        let (s, e) = self.ordered_indices(a, b);
        if s == e {
            return String::new();
        }
        let removed = self.rope.slice(s..e).to_string();
        self.rope.remove(s..e);
        removed
    }

    /// Replace `[a,b)` with `text`, returning the position just after the inserted text.
    pub fn replace_range(&mut self, a: Position, b: Position, text: &str) -> Position {
        let (s, e) = self.ordered_indices(a, b);
        if s < e {
            self.rope.remove(s..e);
        }
        self.rope.insert(s, text);
        self.position_of(s + text.chars().count())
    }

    /// Replace the entire content (used by undo/redo restoration).
    pub fn set_text(&mut self, content: &str) {
        self.rope = Rope::from_str(content);
    }

    fn ordered_indices(&self, a: Position, b: Position) -> (usize, usize) {
        let (x, y) = (self.char_index(a), self.char_index(b));
        if x <= y { (x, y) } else { (y, x) }
    }

    /// Reflow every line wider than `width` rendered columns (tabs expanded to
    /// `tab_size`) by converting the last space inside the limit into a line break,
    /// or inserting a break at the limit when the segment has no space. `cursor`
    /// keeps addressing the same character. Returns true when the text changed.
    pub fn hard_wrap(&mut self, width: usize, tab_size: usize, cursor: &mut Position) -> bool {
        if width == 0 {
            return false;
        }
        let mut cursor_idx = self.char_index(*cursor);
        let mut changed = false;
        let mut line = 0;
        while line < self.line_count() {
            let len = self.line_len(line);
            let fit = self.fitting_chars(line, width, tab_size);
            if fit >= len {
                line += 1;
                continue;
            }
            let start = self.rope.line_to_char(line);
            let break_at = (1..=fit)
                .rev()
                .map(|c| start + c)
                .find(|&i| self.rope.char(i) == ' ');
            match break_at {
                Some(i) => {
                    self.rope.remove(i..i + 1);
                    self.rope.insert_char(i, '\n');
                }
                None => {
                    let i = start + fit;
                    self.rope.insert_char(i, '\n');
                    if cursor_idx >= i {
                        cursor_idx += 1;
                    }
                }
            }
            changed = true;
            line += 1;
        }
        if changed {
            *cursor = self.position_of(cursor_idx);
            tracing::trace!(target: "text", width, lines = self.line_count(), "hard_wrap");
        }
        changed
    }

    /// Leading chars of `line` whose rendered width fits in `width` columns. At least
    /// one, so a single glyph wider than the limit still makes progress.
    fn fitting_chars(&self, line: usize, width: usize, tab_size: usize) -> usize {
        let mut used = 0;
        let mut fit = 0;
        for c in self.rope.line(line).chars() {
            if c == '\n' {
                break;
            }
            let w = char_width(c, used, tab_size);
            if used + w > width {
                break;
            }
            used += w;
            fit += 1;
        }
        fit.max(1)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("lines", &self.line_count())
            .field("bytes", &self.len_bytes())
            .finish()
    }
}
