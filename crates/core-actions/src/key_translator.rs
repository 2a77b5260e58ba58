//! Key code classification.
//!
//! The category order below mirrors the binding table. Categories are mutually
//! exclusive for the default bindings; if a configuration binds one code twice
//! the first row wins. Printable input is checked only after every named
//! binding, and anything left falls through to `EditAction::Fallback`.

use crate::{EditAction, EditKind, MotionKind};
use core_keymap::{Binding, CharSet, KeyClassifier, KeyCode};

const TABLE: &[(Binding, EditAction)] = &[
    (Binding::DeleteCharacterLeft, EditAction::Edit(EditKind::DeleteLeft)),
    (Binding::DeleteCharacterRight, EditAction::Edit(EditKind::DeleteRight)),
    (Binding::MoveCursorToLineStart, EditAction::Move(MotionKind::LineStart)),
    (Binding::MoveCursorToLineEnd, EditAction::Move(MotionKind::LineEnd)),
    (Binding::SelectTillLineStart, EditAction::Select(MotionKind::LineStart)),
    (Binding::SelectTillLineEnd, EditAction::Select(MotionKind::LineEnd)),
    (Binding::MoveCursorToDocumentStart, EditAction::Move(MotionKind::DocumentStart)),
    (Binding::MoveCursorToDocumentEnd, EditAction::Move(MotionKind::DocumentEnd)),
    (Binding::MoveCursorLeft, EditAction::Move(MotionKind::Left)),
    (Binding::MoveCursorRight, EditAction::Move(MotionKind::Right)),
    (Binding::MoveCursorUp, EditAction::Move(MotionKind::Up)),
    (Binding::MoveCursorDown, EditAction::Move(MotionKind::Down)),
    (Binding::MoveToPreviousPage, EditAction::Move(MotionKind::PageUp)),
    (Binding::MoveToNextPage, EditAction::Move(MotionKind::PageDown)),
    (Binding::SelectPageAbove, EditAction::Select(MotionKind::PageUp)),
    (Binding::SelectPageBelow, EditAction::Select(MotionKind::PageDown)),
    (Binding::SelectCharacterLeft, EditAction::Select(MotionKind::Left)),
    (Binding::SelectCharacterRight, EditAction::Select(MotionKind::Right)),
    (Binding::SelectLineAbove, EditAction::Select(MotionKind::Up)),
    (Binding::SelectLineBelow, EditAction::Select(MotionKind::Down)),
    (Binding::MoveCursorToPreviousWord, EditAction::Move(MotionKind::WordLeft)),
    (Binding::MoveCursorToNextWord, EditAction::Move(MotionKind::WordRight)),
    (Binding::InsertTab, EditAction::Edit(EditKind::InsertTab)),
    (Binding::DecreaseIndent, EditAction::Edit(EditKind::Outdent)),
    (Binding::Newline, EditAction::Edit(EditKind::Newline)),
];

/// Classify one key code. `None` only for the "no key" sentinel.
pub fn classify(code: KeyCode, keys: &dyn KeyClassifier, chars: &CharSet) -> Option<EditAction> {
    if code.is_none() {
        return None;
    }
    if let Some((_, action)) = TABLE.iter().find(|(b, _)| keys.is_key(code, *b)) {
        return Some(*action);
    }
    if chars.contains_code(code)
        && let Some(c) = code.as_char()
    {
        return Some(EditAction::Edit(EditKind::InsertChar(c)));
    }
    Some(EditAction::Fallback(code))
}
