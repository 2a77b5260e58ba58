//! Search collaborator: literal / regex match enumeration over a `Buffer`.
//!
//! Every query compiles to one `regex::Regex`:
//! * literal queries are escaped first (`is_regex == false`);
//! * `whole_words` wraps the pattern in `\b(?:...)\b`;
//! * `match_case == false` enables case-insensitive matching.
//!
//! Matches are line-local (a match never spans a newline) and reported in document
//! order with char-offset columns. Zero-width matches are discarded; they cannot be
//! highlighted or replaced meaningfully.

use core_text::{Buffer, Position};
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::{trace, warn};

mod matches;
pub use matches::MatchList;

/// Independent search flags, forwarded verbatim to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SearchFlags {
    pub match_case: bool,
    pub whole_words: bool,
    pub is_regex: bool,
}

impl SearchFlags {
    /// Case-insensitive literal matching.
    pub const LITERAL: SearchFlags = SearchFlags {
        match_case: false,
        whole_words: false,
        is_regex: false,
    };

    pub const fn new(match_case: bool, whole_words: bool, is_regex: bool) -> Self {
        Self {
            match_case,
            whole_words,
            is_regex,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("invalid search pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// One match: `[start, end)` on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: Position,
    pub end: Position,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end.col - self.start.col
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.line == self.start.line && pos.col >= self.start.col && pos.col < self.end.col
    }
}

/// Compiled query.
#[derive(Debug, Clone)]
pub struct Searcher {
    query: String,
    flags: SearchFlags,
    regex: Regex,
}

impl Searcher {
    pub fn new(query: &str, flags: SearchFlags) -> Result<Self, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let body = if flags.is_regex {
            query.to_string()
        } else {
            regex::escape(query)
        };
        let pattern = if flags.whole_words {
            format!(r"\b(?:{body})\b")
        } else {
            body
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!flags.match_case)
            .build()
            .map_err(|source| {
                warn!(target: "search", pattern = %query, error = %source, "pattern_invalid");
                SearchError::InvalidPattern {
                    pattern: query.to_string(),
                    source,
                }
            })?;
        Ok(Self {
            query: query.to_string(),
            flags,
            regex,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Matches inside one line's text (no trailing newline), columns in chars.
    pub fn find_in_line(&self, line: usize, text: &str) -> Vec<Match> {
        let mut out = Vec::new();
        // Byte offsets grow monotonically, so char columns are counted incrementally.
        let mut byte_cursor = 0;
        let mut col_cursor = 0;
        for m in self.regex.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            col_cursor += text[byte_cursor..m.start()].chars().count();
            let start_col = col_cursor;
            let end_col = start_col + m.as_str().chars().count();
            byte_cursor = m.end();
            col_cursor = end_col;
            out.push(Match {
                start: Position::new(line, start_col),
                end: Position::new(line, end_col),
            });
        }
        out
    }

    /// Every match in the buffer, in document order.
    pub fn find_all(&self, buffer: &Buffer) -> Vec<Match> {
        let mut out = Vec::new();
        for line in 0..buffer.line_count() {
            if let Some(text) = buffer.line(line) {
                out.extend(self.find_in_line(line, &text));
            }
        }
        trace!(target: "search", query = %self.query, matches = out.len(), "find_all");
        out
    }
}
