//! Find/replace session operations.
//!
//! States: idle and searching (`FindSession::is_active`). Every entry point takes
//! the full query + flags; when they differ from the running session (or the
//! session is idle) the search is rerun first, so `find_next` from idle simply
//! re-enters searching.
//!
//! Errors come only from compiling the query (`SearchError`). On error nothing in
//! the editor changes: cursor, selection and the previous session are kept.
//!
//! Replacements are buffer mutations: they snapshot for undo and broadcast to every
//! attached editor, whose guard refreshes its own matches. Replacement text is
//! inserted literally.

use core_search::{Match, SearchError, SearchFlags, Searcher};
use tracing::debug;

use crate::{EditorModel, ViewId};

impl EditorModel {
    /// Mark every match and enter searching. Returns the match count.
    pub fn find_all(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
    ) -> Result<usize, SearchError> {
        let count = self.start_search(view, query, flags)?;
        self.repaint(view);
        Ok(count)
    }

    fn start_search(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
    ) -> Result<usize, SearchError> {
        let searcher = Searcher::new(query, flags)?;
        let Some((editor, slot)) = self.split_mut(view) else {
            return Ok(0);
        };
        let matches = searcher.find_all(&slot.text);
        let count = matches.len();
        editor.find.start(query, flags, matches);
        debug!(target: "model.find", view = ?view, query, ?flags, matches = count, "find_started");
        Ok(count)
    }

    fn ensure_search(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
    ) -> Result<(), SearchError> {
        let current = self
            .editor(view)
            .is_some_and(|e| e.find().is_current(query, flags));
        if !current {
            self.start_search(view, query, flags)?;
        }
        Ok(())
    }

    pub fn find_next(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
    ) -> Result<Option<Match>, SearchError> {
        self.step(view, query, flags, true)
    }

    pub fn find_previous(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
    ) -> Result<Option<Match>, SearchError> {
        self.step(view, query, flags, false)
    }

    fn step(
        &mut self,
        view: ViewId,
        query: &str,
        flags: SearchFlags,
        forward: bool,
    ) -> Result<Option<Match>, SearchError> {
        self.ensure_search(view, query, flags)?;
        let Some(editor) = self.editors.get_mut(&view) else {
            return Ok(None);
        };
        let matches = editor.find.matches_mut();
        let found = if forward {
            matches.next()
        } else {
            matches.previous()
        };
        if let Some(m) = found {
            editor.cursor = m.start;
        }
        debug!(target: "model.find", view = ?view, forward, index = ?editor.find.matches().current_index(), "find_step");
        self.repaint(view);
        Ok(found)
    }

    /// Back to idle. Query and flags are kept for the next session.
    pub fn cancel_find(&mut self, view: ViewId) {
        if let Some(editor) = self.editors.get_mut(&view) {
            editor.find.cancel();
            debug!(target: "model.find", view = ?view, "find_cancelled");
        }
        self.repaint(view);
    }

    /// Replace the current match (the first one when none is current yet) and
    /// advance to the match following the replacement. Returns the new current match.
    pub fn replace_next(
        &mut self,
        view: ViewId,
        query: &str,
        replacement: &str,
        flags: SearchFlags,
    ) -> Result<Option<Match>, SearchError> {
        self.ensure_search(view, query, flags)?;
        let Some((editor, slot)) = self.split_mut(view) else {
            return Ok(None);
        };
        let target = match editor.find.matches().current() {
            Some(m) => Some(m),
            None => editor.find.matches_mut().next(),
        };
        let Some(target) = target else {
            return Ok(None);
        };
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
        let end = slot.text.replace_range(target.start, target.end, replacement);
        editor.cursor = end;
        editor.selection.cancel();
        let Some(buffer) = editor.buffer() else {
            return Ok(None);
        };
        debug!(target: "model.find", view = ?view, line = target.start.line, col = target.start.col, "replaced_one");
        self.notify_mutated(buffer, Some(view));

        let Some(editor) = self.editors.get_mut(&view) else {
            return Ok(None);
        };
        let next = editor.find.matches_mut().select_from(end);
        if let Some(m) = next {
            editor.cursor = m.start;
        }
        self.repaint(view);
        Ok(next)
    }

    /// Replace every match in one logical mutation (one undo step). Returns the
    /// number of matches. Matches whose text already equals `replacement` are left
    /// alone; when that covers all of them the buffer is not touched at all.
    pub fn replace_all(
        &mut self,
        view: ViewId,
        query: &str,
        replacement: &str,
        flags: SearchFlags,
    ) -> Result<usize, SearchError> {
        self.start_search(view, query, flags)?;
        let Some((editor, slot)) = self.split_mut(view) else {
            return Ok(0);
        };
        let found = editor.find.matches().len();
        let targets: Vec<Match> = editor
            .find
            .matches()
            .matches()
            .iter()
            .filter(|m| slot.text.slice(m.start, m.end) != replacement)
            .copied()
            .collect();
        if targets.is_empty() {
            self.repaint(view);
            return Ok(found);
        }
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
        // Back to front so earlier match positions stay valid.
        for m in targets.iter().rev() {
            slot.text.replace_range(m.start, m.end, replacement);
        }
        editor.selection.cancel();
        let Some(buffer) = editor.buffer() else {
            return Ok(0);
        };
        debug!(target: "model.find", view = ?view, found, replaced = targets.len(), "replaced_all");
        self.notify_mutated(buffer, Some(view));
        Ok(found)
    }
}
