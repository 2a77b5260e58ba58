//! One on-screen editing surface (`Editor`) and its Consistency Guard.
//!
//! An `Editor` owns derived state (cursor, selection, find session, geometry) that
//! indexes into the buffer it is attached to. The buffer itself lives in the model
//! arena; the editor only knows its `BufferId`.
//!
//! Guard entry points (`on_buffer_mutated`, `on_buffer_replaced`) are driven by the
//! model's broadcast, never speculatively by the editor. Both:
//! * reset the cursor to the origin when it no longer fits the new buffer shape
//!   (no attempt is made to keep a relative position);
//! * cancel the selection when either endpoint no longer fits;
//! * re-run an active search so match positions index the new text;
//! * end with a repaint.

use core_config::EditorOptions;
use core_render::{RenderRequest, Screen, gutter_width};
use core_search::Searcher;
use core_state::{FindSession, Geometry, SelectionModel, WrapMode};
use core_text::{Buffer, Position};
use tracing::{debug, trace, warn};

use crate::render::build_render_request;
use crate::{BufferId, ViewId};

pub struct Editor {
    id: ViewId,
    geometry: Geometry,
    buffer: Option<BufferId>,
    pub cursor: Position,
    pub selection: SelectionModel,
    pub(crate) find: FindSession,
    wrap: WrapMode,
    focused: bool,
    pub tab_size: usize,
    show_line_numbers: bool,
    stylize: bool,
    screen: Option<Box<dyn Screen>>,
    last_render: Option<RenderRequest>,
    renders: u64,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("focused", &self.focused)
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub(crate) fn new(
        id: ViewId,
        geometry: Geometry,
        mut screen: Option<Box<dyn Screen>>,
        opts: &EditorOptions,
    ) -> Self {
        if let Some(s) = screen.as_mut() {
            s.configure(geometry.height, geometry.width, opts.show_line_numbers);
        }
        Self {
            id,
            geometry,
            buffer: None,
            cursor: Position::origin(),
            selection: SelectionModel::default(),
            find: FindSession::default(),
            wrap: WrapMode::new(opts.soft_wrap, opts.hard_wrap),
            focused: false,
            tab_size: opts.tab_size,
            show_line_numbers: opts.show_line_numbers,
            stylize: opts.stylize,
            screen,
            last_render: None,
            renders: 0,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }
    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }
    pub fn find(&self) -> &FindSession {
        &self.find
    }
    pub fn is_focused(&self) -> bool {
        self.focused
    }
    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }
    pub fn stylize(&self) -> bool {
        self.stylize
    }
    pub fn screen(&self) -> Option<&dyn Screen> {
        self.screen.as_deref()
    }
    /// Last request handed to the screen.
    pub fn last_render(&self) -> Option<&RenderRequest> {
        self.last_render.as_ref()
    }
    /// Number of render requests issued so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Rows moved by page navigation.
    pub fn page_rows(&self) -> usize {
        (self.geometry.height as usize).max(1)
    }

    /// Columns available to text once the gutter is taken out.
    pub fn text_width(&self, buffer: &Buffer) -> usize {
        let gutter = gutter_width(buffer.line_count(), self.show_line_numbers);
        self.geometry.width.saturating_sub(gutter) as usize
    }

    /// Hard-wrap `text` to this editor's text width. Added lines can widen the gutter,
    /// so the reflow repeats until the width settles.
    pub fn reflow(&mut self, text: &mut Buffer) -> bool {
        let mut changed = false;
        loop {
            let width = self.text_width(text);
            if !text.hard_wrap(width, self.tab_size, &mut self.cursor) {
                return changed;
            }
            changed = true;
        }
    }

    /// Drop selection and move the cursor to the origin.
    pub(crate) fn reset(&mut self) {
        self.selection.cancel();
        self.cursor = Position::origin();
    }

    pub(crate) fn attach(&mut self, buffer: BufferId) {
        self.buffer = Some(buffer);
    }

    pub(crate) fn detach(&mut self) {
        self.buffer = None;
    }

    pub(crate) fn set_focused(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }

    pub(crate) fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
    }

    pub(crate) fn set_stylize(&mut self, stylize: bool) {
        self.stylize = stylize;
    }

    pub(crate) fn set_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
        if let Some(s) = self.screen.as_mut() {
            s.toggle_line_numbers(show);
        }
    }

    /// Apply a new geometry. Returns false when nothing changed and `forced` is unset.
    pub(crate) fn resize(&mut self, geometry: Geometry, forced: bool) -> bool {
        if !forced && geometry == self.geometry {
            return false;
        }
        self.geometry = geometry;
        self.reset();
        if let Some(s) = self.screen.as_mut() {
            s.resize(geometry.height, geometry.width);
        }
        debug!(target: "model", view = ?self.id, ?geometry, forced, "editor_resized");
        true
    }

    /// Endpoints in document order, via the screen when one is bound.
    pub fn selection_endpoints(&self) -> Option<(Position, Position)> {
        let (start, end) = self.selection.anchors()?;
        Some(match self.screen.as_deref() {
            Some(s) => s.selection_endpoints(start, end),
            None => core_state::normalize(start, end),
        })
    }

    /// Consistency Guard: the attached buffer changed shape.
    pub fn on_buffer_mutated(&mut self, buffer: &Buffer) {
        self.reconcile(buffer);
        self.repaint(Some(buffer));
    }

    /// Consistency Guard: the editor now shows a different buffer identity.
    pub fn on_buffer_replaced(&mut self, new_id: BufferId, buffer: &Buffer) {
        let previous = self.buffer.replace(new_id);
        debug!(target: "model.guard", view = ?self.id, ?previous, new = ?new_id, "buffer_replaced");
        if self.selection.is_active() {
            self.selection.cancel();
            debug!(target: "model.guard", view = ?self.id, "selection_cancelled");
        }
        self.reconcile(buffer);
        self.repaint(Some(buffer));
    }

    fn reconcile(&mut self, buffer: &Buffer) {
        if !self.cursor.is_within(buffer) {
            debug!(
                target: "model.guard",
                view = ?self.id,
                line = self.cursor.line,
                col = self.cursor.col,
                lines = buffer.line_count(),
                "cursor_reset"
            );
            self.cursor = Position::origin();
        }
        if !self.selection.validate(buffer) {
            self.selection.cancel();
            debug!(target: "model.guard", view = ?self.id, "selection_cancelled");
        }
        self.refresh_find(buffer);
    }

    /// Recompute find matches against `buffer` while searching.
    pub(crate) fn refresh_find(&mut self, buffer: &Buffer) {
        if !self.find.is_active() {
            return;
        }
        let Some(query) = self.find.query() else {
            return;
        };
        match Searcher::new(query, self.find.flags()) {
            Ok(searcher) => {
                let matches = searcher.find_all(buffer);
                trace!(target: "model.find", view = ?self.id, matches = matches.len(), "matches_refreshed");
                self.find.refresh(matches);
            }
            Err(_) => self.find.cancel(),
        }
    }

    /// Render Coordinator: build one request and hand it to the screen. Returns false
    /// (and renders nothing) while the editor is in a transient setup/teardown state.
    pub fn repaint(&mut self, buffer: Option<&Buffer>) -> bool {
        if !self.geometry.is_renderable() {
            trace!(target: "model.render", view = ?self.id, reason = "geometry", "render_skipped");
            return false;
        }
        let Some(buffer) = buffer.filter(|_| self.buffer.is_some()) else {
            trace!(target: "model.render", view = ?self.id, reason = "unbound_buffer", "render_skipped");
            return false;
        };
        if self.screen.is_none() {
            trace!(target: "model.render", view = ?self.id, reason = "unbound_screen", "render_skipped");
            return false;
        }
        let request = build_render_request(self, buffer);
        let Geometry { top, left, .. } = self.geometry;
        if let Some(screen) = self.screen.as_mut() {
            screen.render(buffer, &request);
            if let Err(e) = screen.draw(top, left) {
                warn!(target: "model.render", view = ?self.id, error = %e, "draw_failed");
            }
        }
        trace!(target: "model.render", view = ?self.id, highlight = request.highlight.is_some(), selection = request.selection.is_some(), "render_issued");
        self.last_render = Some(request);
        self.renders += 1;
        true
    }
}
