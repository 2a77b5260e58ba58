//! Editor model: the arena of buffers and the editors (viewports) observing them.
//!
//! Attachment is an explicit bidirectional registration keyed by stable ids:
//! a `BufferSlot` lists the `ViewId`s attached to it, an `Editor` holds at most
//! one `BufferId`. Nothing holds a reference into another arena entry, so
//! detaching is a single removal with no dangling pointer to chase.
//!
//! Mutation discipline (single thread, run to completion per input event):
//! 1. An action mutates `BufferSlot::text` through a split `(Editor, BufferSlot)` borrow.
//! 2. `notify_mutated` broadcasts to every attached editor, the originator included,
//!    before control returns to the input loop.
//! 3. Each editor's Consistency Guard reconciles cursor / selection / find state and
//!    repaints. No editor renders against a shape it has not reconciled.
//!
//! Core invariants (must hold after every public call):
//! * `slot.viewers` contains `v` iff `editors[v].buffer() == Some(slot id)`.
//! * Every attached editor's cursor is inside its buffer; an active selection has
//!   both endpoints inside its buffer.
//! * An editor without a buffer is inert: dispatch and repaint skip it.
//!
//! Undo history lives on the slot, so every editor attached to a buffer shares it.

use ahash::AHashMap;
use core_config::EditorOptions;
use core_render::Screen;
use core_state::{Geometry, UndoEngine, WrapMode};
use core_text::Buffer;
use smallvec::SmallVec;
use tracing::{debug, warn};

pub mod edit;
mod editor;
mod find;
mod helpers;
pub mod render;

pub use editor::Editor;
pub use helpers::EditorInfo;

/// Stable identifier for a buffer in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

/// Stable identifier for an editor (viewport) in the arena. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

pub struct BufferSlot {
    pub text: Buffer,
    pub undo: UndoEngine,
    viewers: SmallVec<[ViewId; 4]>,
}

impl BufferSlot {
    fn new(text: Buffer) -> Self {
        Self {
            text,
            undo: UndoEngine::new(),
            viewers: SmallVec::new(),
        }
    }

    /// Attached editors in attachment order.
    pub fn viewers(&self) -> &[ViewId] {
        &self.viewers
    }
}

#[derive(Default)]
pub struct EditorModel {
    buffers: AHashMap<BufferId, BufferSlot>,
    editors: AHashMap<ViewId, Editor>,
    next_buffer: u32,
    next_view: u32,
}

impl EditorModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_buffer(&mut self, text: Buffer) -> BufferId {
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        debug!(target: "model", buffer = ?id, name = %text.name, lines = text.line_count(), "buffer_added");
        self.buffers.insert(id, BufferSlot::new(text));
        id
    }

    /// Remove a buffer. Editors still attached are left without a buffer.
    pub fn remove_buffer(&mut self, id: BufferId) -> Option<Buffer> {
        let slot = self.buffers.remove(&id)?;
        for v in &slot.viewers {
            if let Some(ed) = self.editors.get_mut(v) {
                warn!(target: "model", buffer = ?id, view = ?v, "buffer_removed_with_viewer");
                ed.detach();
            }
        }
        Some(slot.text)
    }

    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id).map(|s| &s.text)
    }

    pub fn buffer_slot(&self, id: BufferId) -> Option<&BufferSlot> {
        self.buffers.get(&id)
    }

    /// Replace a buffer's content from outside any editor (e.g. a reload) and broadcast.
    pub fn set_buffer_text(&mut self, id: BufferId, content: &str) -> bool {
        let Some(slot) = self.buffers.get_mut(&id) else {
            return false;
        };
        slot.text.set_text(content);
        self.notify_mutated(id, None)
    }

    /// Create an editor with no buffer attached (inert until `set_buffer`).
    pub fn create_editor(
        &mut self,
        geometry: Geometry,
        screen: Option<Box<dyn Screen>>,
        opts: &EditorOptions,
    ) -> ViewId {
        let id = ViewId(self.next_view);
        self.next_view += 1;
        self.editors.insert(id, Editor::new(id, geometry, screen, opts));
        debug!(target: "model", view = ?id, ?geometry, "editor_created");
        id
    }

    pub fn editor(&self, id: ViewId) -> Option<&Editor> {
        self.editors.get(&id)
    }

    /// Direct access for hosts and tests. Callers changing cursor or selection must
    /// keep them inside the attached buffer.
    pub fn editor_mut(&mut self, id: ViewId) -> Option<&mut Editor> {
        self.editors.get_mut(&id)
    }

    pub fn editor_ids(&self) -> Vec<ViewId> {
        let mut ids: Vec<_> = self.editors.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Disjoint mutable borrows of an editor and the buffer it is attached to.
    pub fn split_mut(&mut self, view: ViewId) -> Option<(&mut Editor, &mut BufferSlot)> {
        let editor = self.editors.get_mut(&view)?;
        let slot = self.buffers.get_mut(&editor.buffer()?)?;
        Some((editor, slot))
    }

    /// Attach `view` to `buffer` (detaching it from any previous one), reset cursor
    /// and selection, and repaint.
    pub fn set_buffer(&mut self, view: ViewId, buffer: BufferId) -> bool {
        if !self.buffers.contains_key(&buffer) {
            return false;
        }
        let Some(editor) = self.editors.get_mut(&view) else {
            return false;
        };
        if let Some(prev) = editor.buffer()
            && let Some(slot) = self.buffers.get_mut(&prev)
        {
            slot.viewers.retain(|v| *v != view);
        }
        editor.attach(buffer);
        editor.reset();
        let Some(slot) = self.buffers.get_mut(&buffer) else {
            return false;
        };
        if !slot.viewers.contains(&view) {
            slot.viewers.push(view);
        }
        editor.refresh_find(&slot.text);
        debug!(target: "model", view = ?view, buffer = ?buffer, viewers = slot.viewers.len(), "editor_attached");
        editor.repaint(Some(&slot.text));
        true
    }

    /// Detach from the buffer, then drop the editor.
    pub fn destroy_editor(&mut self, view: ViewId) -> Option<Editor> {
        let editor = self.editors.remove(&view)?;
        if let Some(b) = editor.buffer()
            && let Some(slot) = self.buffers.get_mut(&b)
        {
            slot.viewers.retain(|v| *v != view);
        }
        debug!(target: "model", view = ?view, "editor_destroyed");
        Some(editor)
    }

    /// Apply a new geometry. Without `forced`, an unchanged geometry is a no-op;
    /// otherwise cursor and selection reset and the editor repaints.
    pub fn resize(&mut self, view: ViewId, geometry: Geometry, forced: bool) -> bool {
        let Some(editor) = self.editors.get_mut(&view) else {
            return false;
        };
        if !editor.resize(geometry, forced) {
            return false;
        }
        let buffer = editor.buffer().and_then(|b| self.buffers.get(&b));
        editor.repaint(buffer.map(|s| &s.text));
        true
    }

    /// Idempotent. Repaints so the cursor shows.
    pub fn focus(&mut self, view: ViewId) {
        self.set_focus(view, true);
    }

    pub fn blur(&mut self, view: ViewId) {
        self.set_focus(view, false);
    }

    fn set_focus(&mut self, view: ViewId, focused: bool) {
        let Some(editor) = self.editors.get_mut(&view) else {
            return;
        };
        if editor.set_focused(focused) {
            debug!(target: "model", view = ?view, focused, "focus_changed");
        }
        let buffer = editor.buffer().and_then(|b| self.buffers.get(&b));
        editor.repaint(buffer.map(|s| &s.text));
    }

    /// Change wrap flags; resets cursor and selection. Turning hard wrap on reflows
    /// the text to the editor width, which is a mutation broadcast to every viewer.
    pub fn set_wrap(&mut self, view: ViewId, soft: bool, hard: bool) {
        let Some(editor) = self.editors.get_mut(&view) else {
            return;
        };
        editor.set_wrap(WrapMode::new(soft, hard));
        editor.reset();
        if hard
            && let Some((editor, slot)) = self.split_mut(view)
        {
            let before = slot.text.clone();
            if editor.reflow(&mut slot.text)
                && let Some(id) = editor.buffer()
            {
                slot.undo.push_discrete(editor.id().0, core_text::Position::origin(), &before);
                self.notify_mutated(id, Some(view));
                return;
            }
        }
        self.repaint(view);
    }

    /// Broadcast a mutation of `buffer` to every attached editor (the originator
    /// included). Returns false for an unknown buffer.
    pub fn notify_mutated(&mut self, buffer: BufferId, origin: Option<ViewId>) -> bool {
        let Some(slot) = self.buffers.get(&buffer) else {
            return false;
        };
        debug!(
            target: "model.guard",
            buffer = ?buffer,
            origin = ?origin,
            viewers = slot.viewers.len(),
            lines = slot.text.line_count(),
            "broadcast_mutation"
        );
        for v in &slot.viewers {
            if let Some(editor) = self.editors.get_mut(v) {
                editor.on_buffer_mutated(&slot.text);
            }
        }
        true
    }

    /// Move every editor of `from` onto `into`, then drop `from`.
    pub fn merge_buffer(&mut self, from: BufferId, into: BufferId) -> bool {
        if from == into || !self.buffers.contains_key(&into) {
            return false;
        }
        let Some(old) = self.buffers.remove(&from) else {
            return false;
        };
        let Some(slot) = self.buffers.get_mut(&into) else {
            return false;
        };
        for v in &old.viewers {
            if let Some(editor) = self.editors.get_mut(v) {
                if !slot.viewers.contains(v) {
                    slot.viewers.push(*v);
                }
                editor.on_buffer_replaced(into, &slot.text);
            }
        }
        debug!(target: "model", from = ?from, into = ?into, moved = old.viewers.len(), "buffers_merged");
        true
    }

    /// Render Coordinator entry point. Returns true when a request was issued.
    pub fn repaint(&mut self, view: ViewId) -> bool {
        let Some(editor) = self.editors.get_mut(&view) else {
            return false;
        };
        let buffer = editor.buffer().and_then(|b| self.buffers.get(&b));
        editor.repaint(buffer.map(|s| &s.text))
    }

    /// Restore the previous snapshot of the editor's buffer and broadcast.
    pub fn undo(&mut self, view: ViewId) -> bool {
        self.history_step(view, true)
    }

    pub fn redo(&mut self, view: ViewId) -> bool {
        self.history_step(view, false)
    }

    fn history_step(&mut self, view: ViewId, undo: bool) -> bool {
        let Some((editor, slot)) = self.split_mut(view) else {
            return false;
        };
        let stepped = if undo {
            slot.undo.undo(editor.id().0, &mut editor.cursor, &mut slot.text)
        } else {
            slot.undo.redo(editor.id().0, &mut editor.cursor, &mut slot.text)
        };
        if !stepped {
            return false;
        }
        editor.selection.cancel();
        let Some(id) = editor.buffer() else {
            return false;
        };
        self.notify_mutated(id, Some(view))
    }
}
