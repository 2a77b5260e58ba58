//! Find/replace session state.
//!
//! Two states: idle (`active == false`) and searching. The query and the three flags
//! persist across calls (and across `cancel`) so the surrounding application can
//! re-open the find bar pre-filled. Match state is discarded on `cancel`.

use core_search::{Match, MatchList, SearchFlags};

#[derive(Debug, Clone, Default)]
pub struct FindSession {
    active: bool,
    query: Option<String>,
    flags: SearchFlags,
    matches: MatchList,
}

impl FindSession {
    /// Enter the searching state with a fresh match list (no current match).
    pub fn start(&mut self, query: &str, flags: SearchFlags, matches: Vec<Match>) {
        self.active = true;
        self.query = Some(query.to_string());
        self.flags = flags;
        self.matches = MatchList::new(matches);
    }

    /// Swap in matches recomputed after a buffer change. A current match stays on the
    /// first match at or after its old start; with no current match none is selected.
    pub fn refresh(&mut self, matches: Vec<Match>) {
        let anchor = self.matches.current().map(|m| m.start);
        self.matches = MatchList::new(matches);
        if let Some(pos) = anchor {
            self.matches.select_from(pos);
        }
    }

    /// Return to idle; clears match state, keeps query and flags.
    pub fn cancel(&mut self) {
        self.active = false;
        self.matches.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when searching for exactly this query with exactly these flags.
    pub fn is_current(&self, query: &str, flags: SearchFlags) -> bool {
        self.active && self.flags == flags && self.query.as_deref() == Some(query)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    pub fn matches(&self) -> &MatchList {
        &self.matches
    }

    pub fn matches_mut(&mut self) -> &mut MatchList {
        &mut self.matches
    }

    /// Query + flags that drive the search highlight while searching.
    pub fn highlight(&self) -> Option<(&str, SearchFlags)> {
        if !self.active {
            return None;
        }
        self.query.as_deref().map(|q| (q, self.flags))
    }
}
