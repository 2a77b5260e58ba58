//! Style layer: semantic spans resolved to cell flags.
//!
//! Layout pushes spans while placing characters; `TextScreen` then folds them into
//! the `Frame` in one pass. Keeping the two steps apart lets layout stay ignorant
//! of how a given attribute is emitted.
//!
//! Design invariants:
//! * A `StyleSpan` never splits a wide character; callers compute visual columns
//!   with the width engine before constructing spans.
//! * Spans are row-local (identified by screen `row`). Horizontal ranges use
//!   half-open `[start_col, end_col)` semantics in screen columns.
//! * Overlaps are additive: every attribute covering a cell contributes its flag.

use crate::CellFlags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    Cursor,
    Selection,
    Highlight,
    Gutter,
}

impl StyleAttr {
    pub fn flags(self) -> CellFlags {
        match self {
            StyleAttr::Cursor => CellFlags::CURSOR,
            StyleAttr::Selection => CellFlags::SELECTION,
            StyleAttr::Highlight => CellFlags::HIGHLIGHT,
            StyleAttr::Gutter => CellFlags::GUTTER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    pub row: u16,
    pub start_col: u16, // inclusive
    pub end_col: u16,   // exclusive
    pub attr: StyleAttr,
}

impl StyleSpan {
    pub fn width(&self) -> u16 {
        self.end_col.saturating_sub(self.start_col)
    }
}

#[derive(Default, Debug)]
pub struct StyleLayer {
    pub spans: Vec<StyleSpan>,
}

impl StyleLayer {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Push a span, extending the previous one when it is the same attribute and
    /// directly adjacent on the same row.
    pub fn push(&mut self, span: StyleSpan) {
        if span.width() == 0 {
            return;
        }
        if let Some(last) = self
            .spans
            .iter_mut()
            .rev()
            .find(|s| s.attr == span.attr && s.row == span.row)
            && last.end_col == span.start_col
        {
            last.end_col = span.end_col;
            return;
        }
        self.spans.push(span);
    }

    pub fn cursor_span(&self) -> Option<&StyleSpan> {
        self.spans.iter().find(|s| s.attr == StyleAttr::Cursor)
    }

    pub fn spans_of(&self, attr: StyleAttr) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(move |s| s.attr == attr)
    }
}
