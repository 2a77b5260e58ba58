//! Text edits shared by key handlers and menu helpers.
//!
//! These operate on an already split `(Editor, BufferSlot)` pair and never
//! broadcast or snapshot on their own: the caller decides the undo granularity and
//! notifies the buffer once the whole action is done.

use core_text::{Buffer, Position};

use crate::{BufferSlot, Editor};

/// Lines covered by the selection, or the cursor line when none is active.
pub fn target_lines(editor: &Editor) -> std::ops::RangeInclusive<usize> {
    match editor.selection.normalized() {
        Some((start, end)) => start.line..=end.line,
        None => editor.cursor.line..=editor.cursor.line,
    }
}

/// Delete the active selection and park the cursor at its start. `None` when inactive.
pub fn delete_selection(editor: &mut Editor, slot: &mut BufferSlot) -> Option<String> {
    let (start, end) = editor.selection.normalized()?;
    let removed = slot.text.delete_range(start, end);
    editor.cursor = start;
    editor.selection.cancel();
    Some(removed)
}

/// Insert `text` at the cursor, replacing the active selection first.
pub fn replace_selection(editor: &mut Editor, slot: &mut BufferSlot, text: &str) {
    delete_selection(editor, slot);
    slot.text.insert(&mut editor.cursor, text);
}

/// Prefix every target line with a tab. Cursor and selection follow their text.
pub fn indent_lines(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    let lines = target_lines(editor);
    for line in lines.clone() {
        let mut at = Position::new(line, 0);
        slot.text.insert(&mut at, "\t");
    }
    let shift = |p: Position| {
        if lines.contains(&p.line) {
            Position::new(p.line, p.col + 1)
        } else {
            p
        }
    };
    editor.cursor = shift(editor.cursor);
    editor.selection.remap(shift);
    true
}

/// Width of one indent unit at the start of `line`: a tab, or up to `tab_size` spaces.
fn indent_unit(buffer: &Buffer, line: usize, tab_size: usize) -> usize {
    let text = buffer.line(line).unwrap_or_default();
    if text.starts_with('\t') {
        return 1;
    }
    text.chars().take(tab_size).take_while(|c| *c == ' ').count()
}

/// Remove one indent unit from every target line. Returns false when no line had one.
pub fn outdent_lines(editor: &mut Editor, slot: &mut BufferSlot) -> bool {
    let mut removed = Vec::new();
    for line in target_lines(editor) {
        let n = indent_unit(&slot.text, line, editor.tab_size);
        if n > 0 {
            slot.text
                .delete_range(Position::new(line, 0), Position::new(line, n));
            removed.push((line, n));
        }
    }
    if removed.is_empty() {
        return false;
    }
    let shift = |p: Position| match removed.iter().find(|(l, _)| *l == p.line) {
        Some((_, n)) => Position::new(p.line, p.col.saturating_sub(*n)),
        None => p,
    };
    editor.cursor = shift(editor.cursor);
    editor.selection.remap(shift);
    true
}
