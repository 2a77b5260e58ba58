//! Selection model.
//!
//! Endpoints are stored in anchor order (`start` = where the selection began,
//! `end` = the live end that follows the cursor). Sorted order is computed on demand
//! by `normalize` and never written back, so extending the live end back past the
//! anchor keeps behaving correctly.
//!
//! Invariants:
//! - While `active`, both endpoints are inside the attached buffer (callers run
//!   `validate` after every buffer shape change and `cancel` on failure).
//! - While inactive the stored endpoints are stale; accessors return `None` instead
//!   of exposing them.

use core_text::{Buffer, Position};

/// Sort two positions so the first is lexicographically <= the second.
pub fn normalize(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    active: bool,
    start: Position,
    end: Position,
}

impl SelectionModel {
    pub fn begin(&mut self, at: Position) {
        self.active = true;
        self.start = at;
        self.end = at;
    }

    /// Move the live end. Returns false (and does nothing) when no selection is active.
    pub fn extend(&mut self, to: Position) -> bool {
        if !self.active {
            return false;
        }
        self.end = to;
        true
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `(start, end)` in anchor order while active.
    pub fn anchors(&self) -> Option<(Position, Position)> {
        self.active.then_some((self.start, self.end))
    }

    /// `(start, end)` in document order while active.
    pub fn normalized(&self) -> Option<(Position, Position)> {
        self.anchors().map(|(s, e)| normalize(s, e))
    }

    /// True iff active and both normalized endpoints sit on the same line.
    pub fn is_single_line(&self) -> bool {
        self.normalized().is_some_and(|(s, e)| s.line == e.line)
    }

    /// True iff active with both endpoints equal.
    pub fn is_empty(&self) -> bool {
        self.anchors().is_some_and(|(s, e)| s == e)
    }

    /// False when active and either endpoint falls outside `buffer`.
    pub fn validate(&self, buffer: &Buffer) -> bool {
        match self.anchors() {
            Some((s, e)) => s.is_within(buffer) && e.is_within(buffer),
            None => true,
        }
    }

    /// Rewrite both endpoints (used after indent/outdent shifts columns). No-op when inactive.
    pub fn remap(&mut self, mut f: impl FnMut(Position) -> Position) {
        if self.active {
            self.start = f(self.start);
            self.end = f(self.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    #[test]
    fn begin_and_extend_keep_anchor_order() {
        let mut sel = SelectionModel::default();
        sel.begin(p(2, 5));
        assert!(sel.extend(p(1, 0)));
        assert_eq!(sel.anchors(), Some((p(2, 5), p(1, 0))));
        assert_eq!(sel.normalized(), Some((p(1, 0), p(2, 5))));
        // Moving the live end back past the anchor flips sorted order, not storage.
        assert!(sel.extend(p(3, 1)));
        assert_eq!(sel.normalized(), Some((p(2, 5), p(3, 1))));
    }

    #[test]
    fn extend_requires_active() {
        let mut sel = SelectionModel::default();
        assert!(!sel.extend(p(1, 1)));
        assert!(!sel.is_active());
    }

    #[test]
    fn cancelled_selection_hides_stale_endpoints() {
        let mut sel = SelectionModel::default();
        sel.begin(p(0, 1));
        sel.extend(p(0, 4));
        sel.cancel();
        assert_eq!(sel.anchors(), None);
        assert_eq!(sel.normalized(), None);
        assert!(!sel.is_single_line());
    }

    #[test]
    fn single_line_detection() {
        let mut sel = SelectionModel::default();
        sel.begin(p(3, 5));
        sel.extend(p(3, 2));
        assert!(sel.is_single_line());
        sel.extend(p(4, 0));
        assert!(!sel.is_single_line());
    }

    #[test]
    fn validate_against_buffer_shape() {
        let buf = Buffer::from_str("t", "abc\nde").unwrap();
        let mut sel = SelectionModel::default();
        assert!(sel.validate(&buf));
        sel.begin(p(0, 3));
        sel.extend(p(1, 2));
        assert!(sel.validate(&buf));
        sel.extend(p(1, 3));
        assert!(!sel.validate(&buf));
        sel.extend(p(2, 0));
        assert!(!sel.validate(&buf));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(a in 0usize..50, b in 0usize..80, c in 0usize..50, d in 0usize..80) {
            let (s, e) = normalize(p(a, b), p(c, d));
            prop_assert_eq!(normalize(s, e), (s, e));
            prop_assert!(s <= e);
        }

        #[test]
        fn normalize_is_order_independent(a in 0usize..50, b in 0usize..80, c in 0usize..50, d in 0usize..80) {
            prop_assert_eq!(normalize(p(a, b), p(c, d)), normalize(p(c, d), p(a, b)));
        }
    }
}
