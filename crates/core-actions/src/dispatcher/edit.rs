//! Text edit categories: delete left / right, tab, outdent, newline, printable.
//!
//! Undo granularity:
//! * printable chars and backspace join the open typing run (one snapshot per run);
//! * replacing a non-empty selection, forward delete, tab, outdent and newline are
//!   discrete steps.
//!
//! Handlers only touch the buffer and this editor's cursor / selection. The caller
//! broadcasts once the handler reports a change.

use crate::EditKind;
use core_model::{BufferSlot, Editor, edit};
use core_text::{Position, width::leading_whitespace};
use tracing::trace;

/// Returns true when the buffer text changed.
pub(crate) fn handle_edit(kind: EditKind, editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    let before = editor.cursor;
    let changed = match kind {
        EditKind::InsertChar(c) => {
            begin_typing(editor, slot);
            let mut utf8 = [0u8; 4];
            edit::replace_selection(editor, slot, c.encode_utf8(&mut utf8));
            true
        }
        EditKind::DeleteLeft => delete_left(editor, slot),
        EditKind::DeleteRight => delete_right(editor, slot),
        EditKind::InsertTab => {
            slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
            if editor.selection.is_active() && !editor.selection.is_single_line() {
                edit::indent_lines(editor, slot)
            } else {
                edit::replace_selection(editor, slot, "\t");
                true
            }
        }
        EditKind::Outdent => {
            let snapshot = slot.text.clone();
            let changed = edit::outdent_lines(editor, slot);
            if changed {
                slot.undo.push_discrete(editor.id().0, before, &snapshot);
            }
            changed
        }
        EditKind::Newline => {
            slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
            edit::delete_selection(editor, slot);
            let indent = indent_at(&slot.text, editor.cursor);
            slot.text.insert(&mut editor.cursor, &format!("\n{indent}"));
            true
        }
    };
    trace!(target: "actions.dispatch", op = ?kind, changed, line = before.line, col = before.col, to_line = editor.cursor.line, to_col = editor.cursor.col, "edit");
    changed
}

fn has_text_selected(editor: &Editor) -> bool {
    editor.selection.is_active() && !editor.selection.is_empty()
}

/// Typing replaces a selection as its own step, then joins (or opens) the run.
fn begin_typing(editor: &Editor, slot: &mut BufferSlot) {
    if has_text_selected(editor) {
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
    }
    slot.undo.begin_insert_run(editor.id().0, editor.cursor, &slot.text);
}

fn delete_left(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    if has_text_selected(editor) {
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
        return edit::delete_selection(editor, slot).is_some();
    }
    editor.selection.cancel();
    if editor.cursor == Position::origin() {
        return false;
    }
    slot.undo.begin_insert_run(editor.id().0, editor.cursor, &slot.text);
    slot.text.delete_char_before(&mut editor.cursor)
}

fn delete_right(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    if has_text_selected(editor) {
        slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
        return edit::delete_selection(editor, slot).is_some();
    }
    editor.selection.cancel();
    if slot.text.char_index(editor.cursor) >= slot.text.len_chars() {
        return false;
    }
    slot.undo.push_discrete(editor.id().0, editor.cursor, &slot.text);
    slot.text.delete_char_at(editor.cursor)
}

/// Leading whitespace of the line up to `at` (auto-indent for the new line).
fn indent_at(buffer: &core_text::Buffer, at: Position) -> String {
    let head: String = buffer
        .line(at.line)
        .unwrap_or_default()
        .chars()
        .take(at.col)
        .collect();
    leading_whitespace(&head).to_string()
}
