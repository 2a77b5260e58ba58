//! Rendering collaborator boundary + reference cell compositor.
//!
//! The editing core never draws. It assembles one `RenderRequest` per repaint and
//! hands it to a `Screen` together with the buffer; the screen owns layout (gutter,
//! tab expansion, wrap-line splitting, scrolling) and emission.
//!
//! Cell model: `Cell` stores the printable text for leader cells along with its
//! visual width; continuation cells (width==0) occupy the remaining columns of a
//! wide character and never print text.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty.
//! - Continuations immediately follow their leader horizontally; no gaps.
//! - Styling flags applied over spans (`apply_flags_span`) mark leader + continuations,
//!   but emission derives printable content solely from leaders.
//!
//! Exposed Components:
//! - `RenderRequest` / payloads: the immutable description of one repaint.
//! - `Screen`: the collaborator trait a viewport renders through.
//! - `Cell` / `Frame`: logical grid backing `TextScreen` composition.
//! - `screen::TextScreen`: reference `Screen` drawing through crossterm to any `io::Write`.
//! - `style`: semantic spans (selection, search match, cursor) resolved to `CellFlags`.
//! - `writer`: terminal command list (MoveTo, Style, Print) flushed in one pass.
//! - `status`: display strings for the status bar (cursor label, selection length).

use bitflags::bitflags;
use core_search::SearchFlags;
use core_text::{Buffer, Position};

pub mod screen;
pub mod status;
pub mod style;
pub mod writer;

pub use screen::TextScreen;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const SELECTION = 0b0000_0001; // inside the selection box
        const HIGHLIGHT = 0b0000_0010; // search / selection-echo match
        const CURSOR    = 0b0000_0100; // software cursor
        const GUTTER    = 0b0000_1000; // line-number column
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Printable text (leader cells only). Empty for continuation cells.
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
    pub flags: CellFlags,
}

impl Cell {
    #[inline]
    pub fn leader(cluster: &str, width: u16, flags: CellFlags) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.max(1) as u8,
            flags,
        }
    }
    #[inline]
    pub fn continuation(flags: CellFlags) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            flags,
        }
    }
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
    #[inline]
    pub fn visual_width(&self) -> u16 {
        self.width as u16
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            cluster: " ".to_string(),
            width: 1,
            flags: CellFlags::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a leader at (x,y) and populate continuation cells for its width.
    pub fn set_cluster(&mut self, x: u16, y: u16, cluster: &str, width: u16, flags: CellFlags) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = width.max(1).min(self.width - x);
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(cluster, w, flags);
        }
        for dx in 1..w {
            if let Some(c_idx) = self.index(x + dx, y) {
                self.cells[c_idx] = Cell::continuation(flags);
            }
        }
    }

    /// Apply additional flags over an existing span (leader + continuations).
    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    /// Iterate leader cells of a row, yielding (&str, width, flags, start_x).
    pub fn row_leaders<'a>(
        &'a self,
        y: u16,
    ) -> impl Iterator<Item = (&'a str, u16, CellFlags, u16)> + 'a {
        let width = if y < self.height { self.width } else { 0 };
        let start = y as usize * self.width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            while x < width {
                let cell = &self.cells[start + x as usize];
                if cell.is_leader() {
                    let w = cell.visual_width();
                    let out = (&*cell.cluster, w, cell.flags, x);
                    x = x.saturating_add(w);
                    return Some(out);
                }
                x += 1;
            }
            None
        })
    }

    /// Row text as printed (testing / diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        self.row_leaders(y).map(|(c, _, _, _)| c).collect()
    }

    /// X coordinates in row `y` carrying every flag in `flags`.
    pub fn flagged_columns(&self, y: u16, flags: CellFlags) -> Vec<u16> {
        (0..self.width)
            .filter(|&x| self.cell(x, y).is_some_and(|c| c.flags.contains(flags)))
            .collect()
    }
}

/// Selection box endpoints in anchor order (first set, last set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPayload {
    pub start: Position,
    pub end: Position,
}

/// Text to highlight and the flags it is matched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPayload {
    pub text: String,
    pub flags: SearchFlags,
}

/// Everything a `Screen` needs for one layout + draw at the viewport geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub cursor: Position,
    pub tab_size: usize,
    pub soft_wrap: bool,
    pub hard_wrap: bool,
    pub selection: Option<SelectionPayload>,
    pub highlight: Option<HighlightPayload>,
    pub focused: bool,
    pub stylize: bool,
}

/// Rendering collaborator owned by each viewport.
pub trait Screen {
    fn configure(&mut self, height: u16, width: u16, show_line_numbers: bool);
    fn resize(&mut self, height: u16, width: u16);
    fn toggle_line_numbers(&mut self, show: bool);
    /// Endpoints in document order.
    fn selection_endpoints(&self, start: Position, end: Position) -> (Position, Position) {
        if start <= end { (start, end) } else { (end, start) }
    }
    fn render(&mut self, buffer: &Buffer, request: &RenderRequest);
    fn draw(&mut self, top: u16, left: u16) -> anyhow::Result<()>;
}

/// Columns taken by the line-number gutter: digits (at least 3) plus one separator.
pub fn gutter_width(line_count: usize, show_line_numbers: bool) -> u16 {
    if !show_line_numbers {
        return 0;
    }
    let digits = line_count.max(1).ilog10() as u16 + 1;
    digits.max(3) + 1
}
