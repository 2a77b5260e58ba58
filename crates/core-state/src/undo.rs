//! Per-buffer undo/redo history.
//!
//! Snapshots are coarse clones of the buffer plus the cursor of the viewport that
//! made the edit. The engine lives next to the buffer (not the viewport) so every
//! viewport attached to the same text shares one history.
//!
//! Every entry is tagged with its author. Stepping restores the saved cursor only
//! for that author; any other viewport keeps its own cursor, clamped to the
//! restored text.

use core_text::{Buffer, Position};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

#[derive(Clone)]
struct Snapshot {
    buffer: Buffer,
    cursor: Position,
    author: u32,
    hash: u64,
}

/// Insert run state. A run is opened lazily by the first coalescable edit and closed
/// by any other action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

pub struct UndoEngine {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    insert_run: InsertRun,
    run_author: u32,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            run_author: 0,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Record the pre-edit state. Identical successive content is skipped.
    pub fn push_snapshot(&mut self, author: u32, cursor: Position, buffer: &Buffer) {
        let hash = buffer_hash(buffer);
        if let Some(last) = self.undo_stack.last()
            && last.hash == hash
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), hash, "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(Snapshot {
            buffer: buffer.clone(),
            cursor,
            author,
            hash,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), lines = buffer.line_count(), hash, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Snapshot only at the first edit of a run; later edits in the run are folded in.
    /// A run never spans two authors.
    pub fn begin_insert_run(&mut self, author: u32, cursor: Position, buffer: &Buffer) {
        match &mut self.insert_run {
            InsertRun::Active { edits } if self.run_author == author => *edits += 1,
            _ => {
                self.push_snapshot(author, cursor, buffer);
                self.insert_run = InsertRun::Active { edits: 1 };
                self.run_author = author;
            }
        }
    }

    pub fn end_insert_run(&mut self) {
        self.insert_run = InsertRun::Inactive;
    }

    /// Close any open run and snapshot so this edit undoes on its own.
    pub fn push_discrete(&mut self, author: u32, cursor: Position, buffer: &Buffer) {
        self.end_insert_run();
        self.push_snapshot(author, cursor, buffer);
    }

    pub fn undo(&mut self, author: u32, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.end_insert_run();
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        self.redo_stack.push(Snapshot {
            buffer: buffer.clone(),
            cursor: *cursor,
            author,
            hash: buffer_hash(buffer),
        });
        restore(last, author, cursor, buffer);
        true
    }

    pub fn redo(&mut self, author: u32, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.end_insert_run();
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        self.undo_stack.push(Snapshot {
            buffer: buffer.clone(),
            cursor: *cursor,
            author,
            hash: buffer_hash(buffer),
        });
        restore(next, author, cursor, buffer);
        true
    }
}

fn restore(snapshot: Snapshot, author: u32, cursor: &mut Position, buffer: &mut Buffer) {
    *buffer = snapshot.buffer;
    if snapshot.author == author {
        *cursor = snapshot.cursor;
    } else {
        cursor.clamp_to(buffer);
    }
}

fn buffer_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    for i in 0..buf.line_count() {
        if let Some(l) = buf.line(i) {
            h.write(l.as_bytes());
        }
        h.write_u8(b'\n');
    }
    h.finish()
}
