//! Widget-boundary queries and editing helpers (status bar, menus, shortcuts).
//!
//! Every helper takes a `ViewId` and degrades to `None` / `false` / empty for an
//! unknown editor or one without a buffer. Mutating helpers snapshot for undo and
//! broadcast like a key action would.

use core_render::status::{StatusContext, format_status, selection_label};
use core_search::SearchFlags;
use core_state::{Geometry, WrapMode};
use core_text::{Position, rendered_col, width::leading_whitespace};

use crate::render::resolve_highlight;
use crate::{BufferId, BufferSlot, Editor, EditorModel, ViewId, edit};

/// Aggregate editor state for status-bar consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInfo {
    pub view: ViewId,
    pub geometry: Geometry,
    pub buffer: Option<BufferId>,
    pub buffer_name: Option<String>,
    pub cursor: Position,
    /// Anchor-order endpoints while a selection is active.
    pub selection: Option<(Position, Position)>,
    pub selected_chars: Option<usize>,
    pub tab_size: usize,
    pub wrap: WrapMode,
    pub focused: bool,
    pub find_active: bool,
    /// Text currently driving the highlight (search query or selection echo).
    pub search_text: Option<String>,
    pub flags: SearchFlags,
    /// `(current index, total)` while searching.
    pub matches: Option<(Option<usize>, usize)>,
}

impl EditorInfo {
    pub fn status_line(&self) -> String {
        format_status(&StatusContext {
            name: self.buffer_name.as_deref().unwrap_or("[No Name]"),
            cursor: self.cursor,
            selected: self.selected_chars,
            find: self.matches,
        })
    }
}

fn selected_chars(editor: &Editor, slot: &BufferSlot) -> Option<usize> {
    let (start, end) = editor.selection.normalized()?;
    Some(slot.text.char_index(end) - slot.text.char_index(start))
}

impl EditorModel {
    fn attached(&self, view: ViewId) -> Option<(&Editor, &BufferSlot)> {
        let editor = self.editors.get(&view)?;
        let slot = self.buffers.get(&editor.buffer()?)?;
        Some((editor, slot))
    }

    /// `"Ln {line+1}, Col {col+1}"`.
    pub fn cursor_label(&self, view: ViewId) -> Option<String> {
        self.editors.get(&view).map(|e| e.cursor.to_string())
    }

    /// `"{n} selected"` while a selection is active, empty otherwise.
    pub fn selection_length_label(&self, view: ViewId) -> String {
        selection_label(
            self.attached(view)
                .and_then(|(editor, slot)| selected_chars(editor, slot)),
        )
    }

    pub fn info(&self, view: ViewId) -> Option<EditorInfo> {
        let editor = self.editors.get(&view)?;
        let slot = editor.buffer().and_then(|b| self.buffers.get(&b));
        let find = editor.find();
        let highlight = slot.and_then(|s| resolve_highlight(editor, &s.text));
        Some(EditorInfo {
            view,
            geometry: editor.geometry(),
            buffer: editor.buffer(),
            buffer_name: slot.map(|s| s.text.name.clone()),
            cursor: editor.cursor,
            selection: editor.selection.anchors(),
            selected_chars: slot.and_then(|s| selected_chars(editor, s)),
            tab_size: editor.tab_size,
            wrap: editor.wrap(),
            focused: editor.is_focused(),
            find_active: find.is_active(),
            flags: highlight
                .as_ref()
                .map_or(find.flags(), |h| h.flags),
            search_text: highlight.map(|h| h.text),
            matches: find
                .is_active()
                .then(|| (find.matches().current_index(), find.matches().len())),
        })
    }

    pub fn selected_text(&self, view: ViewId) -> Option<String> {
        let (editor, slot) = self.attached(view)?;
        let (start, end) = editor.selection.normalized()?;
        Some(slot.text.slice(start, end))
    }

    /// Selection endpoints in document order (via the editor's screen).
    pub fn selection_endpoints(&self, view: ViewId) -> Option<(Position, Position)> {
        self.editors.get(&view)?.selection_endpoints()
    }

    /// Buffer size in bytes.
    pub fn file_size(&self, view: ViewId) -> Option<usize> {
        self.attached(view).map(|(_, slot)| slot.text.len_bytes())
    }

    pub fn leading_whitespace(&self, view: ViewId, line: usize) -> Option<String> {
        let (_, slot) = self.attached(view)?;
        let text = slot.text.line(line)?;
        Some(leading_whitespace(&text).to_string())
    }

    /// Rendered width of the leading whitespace of `line` (tabs expanded).
    pub fn leading_whitespace_rendered(&self, view: ViewId, line: usize) -> Option<usize> {
        let (editor, slot) = self.attached(view)?;
        let text = slot.text.line(line)?;
        let n = leading_whitespace(&text).chars().count();
        Some(rendered_col(&text, n, editor.tab_size))
    }

    /// Delete the selected text and broadcast. Returns what was removed.
    pub fn delete_selected_text(&mut self, view: ViewId) -> Option<String> {
        let (editor, slot) = self.split_mut(view)?;
        if !editor.selection.is_active() {
            return None;
        }
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
        let removed = edit::delete_selection(editor, slot)?;
        let buffer = editor.buffer()?;
        self.notify_mutated(buffer, Some(view));
        Some(removed)
    }

    /// Indent the selected lines (or the cursor line) by one tab.
    pub fn shift_selection_right(&mut self, view: ViewId) -> bool {
        self.shift_lines(view, true)
    }

    /// Remove one indent unit from the selected lines (or the cursor line).
    pub fn shift_selection_left(&mut self, view: ViewId) -> bool {
        self.shift_lines(view, false)
    }

    fn shift_lines(&mut self, view: ViewId, right: bool) -> bool {
        let Some((editor, slot)) = self.split_mut(view) else {
            return false;
        };
        let before = slot.text.clone();
        let cursor = editor.cursor;
        let changed = if right {
            edit::indent_lines(editor, slot)
        } else {
            edit::outdent_lines(editor, slot)
        };
        if !changed {
            return false;
        }
        slot.undo.push_discrete(editor.id().0, cursor, &before);
        let Some(buffer) = editor.buffer() else {
            return false;
        };
        self.notify_mutated(buffer, Some(view))
    }

    pub fn toggle_line_numbers(&mut self, view: ViewId, show: bool) {
        if let Some(editor) = self.editors.get_mut(&view) {
            editor.set_line_numbers(show);
        }
        self.repaint(view);
    }

    pub fn toggle_stylize(&mut self, view: ViewId, stylize: bool) {
        if let Some(editor) = self.editors.get_mut(&view) {
            editor.set_stylize(stylize);
        }
        self.repaint(view);
    }
}
