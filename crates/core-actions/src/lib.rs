//! core-actions: key code -> semantic editing action -> handler.
//!
//! One input key code is classified exactly once (`classify`) into the closed
//! `EditAction` set, then `dispatch` matches it exhaustively against the
//! per-category handlers in `dispatcher`. The binding table is injected as a
//! `KeyClassifier`, so tests and configurations swap it without touching
//! dispatch logic.

pub mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::classify;

use core_keymap::KeyCode;

/// Cursor motions shared by the move and select categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    WordLeft,
    WordRight,
    PageUp,
    PageDown,
}

/// Text-mutating categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    DeleteLeft,
    DeleteRight,
    InsertTab,
    Outdent,
    Newline,
    InsertChar(char),
}

/// Result of classifying one key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Edit(EditKind),
    /// Cancel any selection, then move.
    Move(MotionKind),
    /// Start a selection at the cursor if needed, move, extend to the new cursor.
    Select(MotionKind),
    /// Anything the table does not name: editor shortcuts or a no-op.
    Fallback(KeyCode),
}
