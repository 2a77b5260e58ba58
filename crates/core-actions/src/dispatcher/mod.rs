//! Dispatcher applying one key code to one editor of the model.
//!
//! Sub-modules:
//! * `motion` - move and select categories (pure navigation, never mutate)
//! * `edit`   - text mutation (delete, tab / outdent, newline, printable)
//! * `undo`   - fallback shortcuts (select all, undo, redo)
//!
//! Flow per key: sentinel check, focus, classify, run the handler on the split
//! `(Editor, BufferSlot)` borrow, reflow when hard wrap is on, then broadcast the
//! mutation to every attached editor (originator included) or, for navigation,
//! repaint this editor only. The whole sequence completes before `dispatch`
//! returns, so no sibling renders against text it has not reconciled.

use crate::{EditAction, classify};
use core_keymap::{CharSet, KeyClassifier, KeyCode};
use core_model::{EditorModel, ViewId};
use tracing::{trace, warn};

mod edit;
mod motion;
mod undo;

/// Result of dispatching a single key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Category the key was classified into (`None` for the sentinel or a skipped key).
    pub action: Option<EditAction>,
    /// True when buffer text changed and the change was broadcast.
    pub mutated: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
}

/// Apply one key code to `view`.
///
/// The sentinel code (`KeyCode::NONE`) is a no-op without side effects. An editor
/// with no buffer attached is inert: the key is dropped with a warning.
pub fn dispatch(
    model: &mut EditorModel,
    view: ViewId,
    code: KeyCode,
    keys: &dyn KeyClassifier,
    chars: &CharSet,
) -> DispatchResult {
    if code.is_none() {
        return DispatchResult::clean();
    }
    let Some(editor) = model.editor(view) else {
        warn!(target: "actions.dispatch", view = ?view, code = code.0, "dispatch_unknown_view");
        return DispatchResult::clean();
    };
    if editor.buffer().is_none() {
        warn!(target: "actions.dispatch", view = ?view, code = code.0, "dispatch_without_buffer");
        return DispatchResult::clean();
    }
    if !editor.is_focused() {
        model.focus(view);
    }
    let Some(action) = classify(code, keys, chars) else {
        return DispatchResult::clean();
    };
    trace!(target: "actions.dispatch", view = ?view, code = code.0, ?action, "classified");

    let Some((editor, slot)) = model.split_mut(view) else {
        return DispatchResult::clean();
    };
    let mutated = match action {
        EditAction::Edit(kind) => edit::handle_edit(kind, editor, slot),
        EditAction::Move(kind) => {
            motion::handle_move(kind, editor, slot);
            false
        }
        EditAction::Select(kind) => {
            motion::handle_select(kind, editor, slot);
            false
        }
        EditAction::Fallback(code) => undo::handle_fallback(code, keys, editor, slot),
    };
    if mutated && editor.wrap().hard && editor.reflow(&mut slot.text) {
        trace!(target: "actions.dispatch", view = ?view, width = editor.text_width(&slot.text), "hard_wrap_reflow");
    }
    match (mutated, editor.buffer()) {
        (true, Some(buffer)) => {
            model.notify_mutated(buffer, Some(view));
        }
        _ => {
            model.repaint(view);
        }
    }
    DispatchResult {
        action: Some(action),
        mutated,
    }
}
