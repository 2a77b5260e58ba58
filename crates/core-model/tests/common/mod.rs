#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_config::EditorOptions;
use core_model::{BufferId, EditorModel, ViewId};
use core_render::{Screen, TextScreen};
use core_state::Geometry;
use core_text::{Buffer, Position};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

pub const GEOMETRY: Geometry = Geometry::new(0, 0, 10, 40);

pub fn screen() -> Option<Box<dyn Screen>> {
    Some(Box::new(TextScreen::new(std::io::sink())))
}

pub fn opts() -> EditorOptions {
    EditorOptions {
        show_line_numbers: false,
        ..EditorOptions::default()
    }
}

/// One buffer named `notes.txt` with `views` editors attached to it.
pub fn model_with(text: &str, views: usize) -> (EditorModel, BufferId, Vec<ViewId>) {
    let mut model = EditorModel::new();
    let buffer = model.add_buffer(Buffer::from_str("notes.txt", text).unwrap());
    let ids = (0..views)
        .map(|_| {
            let v = model.create_editor(GEOMETRY, screen(), &opts());
            assert!(model.set_buffer(v, buffer));
            v
        })
        .collect();
    (model, buffer, ids)
}

pub fn select(model: &mut EditorModel, view: ViewId, start: Position, end: Position) {
    let editor = model.editor_mut(view).unwrap();
    editor.selection.begin(start);
    editor.selection.extend(end);
    editor.cursor = end;
}

pub fn text(model: &EditorModel, buffer: BufferId) -> String {
    model.buffer(buffer).unwrap().text()
}

pub fn cursor(model: &EditorModel, view: ViewId) -> Position {
    model.editor(view).unwrap().cursor
}

#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl<'a> Write for LockedWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` under a debug-level fmt subscriber and return everything it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let (writer, buffer) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
}
