//! Ordered match list with cyclic navigation.
//!
//! `current == None` means "no match selected yet": `next` then yields the first
//! match and `previous` the last. Navigation wraps past either end.

use crate::Match;
use core_text::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchList {
    matches: Vec<Match>,
    current: Option<usize>,
}

impl MatchList {
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<Match> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = None;
    }

    pub fn next(&mut self) -> Option<Match> {
        if self.matches.is_empty() {
            return None;
        }
        let idx = match self.current {
            Some(i) => (i + 1) % self.matches.len(),
            None => 0,
        };
        self.current = Some(idx);
        Some(self.matches[idx])
    }

    pub fn previous(&mut self) -> Option<Match> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let idx = match self.current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.current = Some(idx);
        Some(self.matches[idx])
    }

    /// Select the first match starting at or after `pos`, wrapping to the first match.
    pub fn select_from(&mut self, pos: Position) -> Option<Match> {
        if self.matches.is_empty() {
            self.current = None;
            return None;
        }
        let idx = self
            .matches
            .iter()
            .position(|m| m.start >= pos)
            .unwrap_or(0);
        self.current = Some(idx);
        Some(self.matches[idx])
    }
}
