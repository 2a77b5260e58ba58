//! Per-viewport editing state: selection, find session, wrap mode, geometry, and the
//! per-buffer undo engine.
//!
//! Everything here is plain data plus local invariants. Cross-object consistency
//! (reclamping against a mutated buffer, highlight-source resolution) lives in
//! `core-model`, which owns both the buffers and the viewports.
//!
//! Undo Coalescing:
//! - A contiguous run of character inserts and backspaces is captured by a single
//!   snapshot taken lazily at the first mutation in the run.
//! - Boundaries: any non-insert action (motion, newline, delete-right, find/replace).
//! - Discrete edits always push an immediate snapshot so each one undoes individually.

pub mod find;
pub mod selection;
pub mod undo;

pub use find::FindSession;
pub use selection::{SelectionModel, normalize};
pub use undo::{InsertRun, UNDO_HISTORY_MAX, UndoEngine};

/// On-screen rectangle owned by a viewport. Changes only through an explicit resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub top: u16,
    pub left: u16,
    pub height: u16,
    pub width: u16,
}

impl Geometry {
    pub const fn new(top: u16, left: u16, height: u16, width: u16) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    /// Zero-sized geometry cannot be rendered (transient during setup/teardown).
    pub fn is_renderable(&self) -> bool {
        self.height > 0 && self.width > 0
    }
}

/// Wrap flags. Not mutually exclusive: `soft` re-flows visually, `hard` inserts real
/// line breaks into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapMode {
    pub soft: bool,
    pub hard: bool,
}

impl WrapMode {
    pub const fn new(soft: bool, hard: bool) -> Self {
        Self { soft, hard }
    }
}
