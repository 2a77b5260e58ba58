//! Fallback category: editor shortcuts resolved through the same classifier, and
//! a silent no-op for every other unclassified key.
//!
//! Undo / redo restore a whole-buffer snapshot, so they count as mutations and the
//! caller broadcasts them like any edit. The selection is dropped because its
//! endpoints index text that no longer exists.

use core_keymap::{Binding, KeyClassifier, KeyCode};
use core_model::{BufferSlot, Editor};
use core_text::Position;
use tracing::trace;

pub(crate) fn handle_fallback(
    code: KeyCode,
    keys: &dyn KeyClassifier,
    editor: &mut Editor,
    slot: &mut BufferSlot,
) -> bool {
    if keys.is_key(code, Binding::Undo) {
        handle_undo(editor, slot)
    } else if keys.is_key(code, Binding::Redo) {
        handle_redo(editor, slot)
    } else if keys.is_key(code, Binding::SelectAll) {
        select_all(editor, slot);
        false
    } else {
        trace!(target: "actions.dispatch", code = code.0, "unhandled_key");
        false
    }
}

fn handle_undo(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    let before = slot.text.line_count();
    if !slot.undo.undo(editor.id().0, &mut editor.cursor, &mut slot.text) {
        return false;
    }
    editor.selection.cancel();
    trace!(target: "actions.dispatch", op = "undo", lines_changed = (before != slot.text.line_count()), "undo");
    true
}

fn handle_redo(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    let before = slot.text.line_count();
    if !slot.undo.redo(editor.id().0, &mut editor.cursor, &mut slot.text) {
        return false;
    }
    editor.selection.cancel();
    trace!(target: "actions.dispatch", op = "redo", lines_changed = (before != slot.text.line_count()), "redo");
    true
}

fn select_all(editor: &mut Editor, slot: &mut BufferSlot) {
    slot.undo.end_insert_run();
    let end = slot.text.end_position();
    editor.selection.begin(Position::origin());
    editor.selection.extend(end);
    editor.cursor = end;
}
