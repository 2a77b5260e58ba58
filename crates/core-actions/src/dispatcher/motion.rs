//! Move and select categories.
//!
//! Both close any open typing run so the next edit starts its own undo step.
//! Move cancels the selection first. Select anchors a selection at the cursor
//! when none is active, then drags the live end along with the cursor; the
//! anchor never moves, so extending back past it flips the normalized order.

use crate::MotionKind;
use core_model::{BufferSlot, Editor};
use core_text::{Buffer, motion};
use tracing::trace;

fn apply_motion(kind: MotionKind, editor: &mut Editor, buffer: &Buffer) {
    let rows = editor.page_rows();
    let pos = &mut editor.cursor;
    match kind {
        MotionKind::Left => motion::left(buffer, pos),
        MotionKind::Right => motion::right(buffer, pos),
        MotionKind::Up => motion::up(buffer, pos),
        MotionKind::Down => motion::down(buffer, pos),
        MotionKind::LineStart => motion::line_start(buffer, pos),
        MotionKind::LineEnd => motion::line_end(buffer, pos),
        MotionKind::DocumentStart => motion::document_start(buffer, pos),
        MotionKind::DocumentEnd => motion::document_end(buffer, pos),
        MotionKind::WordLeft => motion::word_left(buffer, pos),
        MotionKind::WordRight => motion::word_right(buffer, pos),
        MotionKind::PageUp => motion::page_up(buffer, pos, rows),
        MotionKind::PageDown => motion::page_down(buffer, pos, rows),
    }
}

pub(crate) fn handle_move(kind: MotionKind, editor: &mut Editor, slot: &mut BufferSlot) {
    slot.undo.end_insert_run();
    editor.selection.cancel();
    let before = editor.cursor;
    apply_motion(kind, editor, &slot.text);
    trace!(target: "actions.dispatch", op = "move", ?kind, line = before.line, col = before.col, to_line = editor.cursor.line, to_col = editor.cursor.col, "motion");
}

pub(crate) fn handle_select(kind: MotionKind, editor: &mut Editor, slot: &mut BufferSlot) {
    slot.undo.end_insert_run();
    if !editor.selection.is_active() {
        editor.selection.begin(editor.cursor);
    }
    apply_motion(kind, editor, &slot.text);
    editor.selection.extend(editor.cursor);
    trace!(target: "actions.dispatch", op = "select", ?kind, anchors = ?editor.selection.anchors(), "motion");
}
