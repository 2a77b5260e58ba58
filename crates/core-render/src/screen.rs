//! `TextScreen`: reference `Screen` implementation.
//!
//! Layout pipeline per `render`:
//! 1. Scroll: adjust `first_line` (and `first_col` when not soft wrapping) so the
//!    cursor cell is inside the text area.
//! 2. Compose: walk visible lines, expanding tabs to the next stop and splitting at
//!    the text width when soft wrapping. The gutter shows the 1-based line number on
//!    the first row of each logical line only.
//! 3. Style: push selection / highlight / cursor spans while placing characters, then
//!    fold them into the frame.
//!
//! A soft-wrapped line takes `rendered_width / text_width + 1` rows so the cell after
//! the last character (a valid cursor target) always exists.
//!
//! `draw` emits the composed frame row-major through `writer::Writer`. Nothing is
//! drawn before the first `render`.

use anyhow::Result;
use core_search::{Match, Searcher};
use core_text::{Buffer, Position, char_width, rendered_col};
use std::io::Write;
use tracing::{trace, warn};

use crate::style::{StyleAttr, StyleLayer, StyleSpan};
use crate::writer::Writer;
use crate::{CellFlags, Frame, RenderRequest, Screen, gutter_width};

pub struct TextScreen<W: Write> {
    out: W,
    height: u16,
    width: u16,
    show_line_numbers: bool,
    first_line: usize,
    first_col: usize,
    frame: Frame,
    styles: StyleLayer,
    rendered: bool,
}

/// Per-render values shared by every line.
struct LineCtx<'a> {
    req: &'a RenderRequest,
    selection: Option<(Position, Position)>,
    gutter: u16,
    text_width: u16,
}

impl<W: Write> TextScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            height: 0,
            width: 0,
            show_line_numbers: true,
            first_line: 0,
            first_col: 0,
            frame: Frame::new(0, 0),
            styles: StyleLayer::new(),
            rendered: false,
        }
    }

    pub fn last_frame(&self) -> &Frame {
        &self.frame
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn line_rows(&self, buffer: &Buffer, line: usize, ctx_width: u16, req: &RenderRequest) -> usize {
        if !req.soft_wrap || ctx_width == 0 {
            return 1;
        }
        let text = buffer.line(line).unwrap_or_default();
        let w = rendered_col(&text, buffer.line_len(line), req.tab_size);
        w / ctx_width as usize + 1
    }

    fn scroll_to_cursor(&mut self, buffer: &Buffer, req: &RenderRequest, text_width: u16) {
        let cursor = req.cursor;
        self.first_line = self.first_line.min(buffer.line_count().saturating_sub(1));
        if cursor.line < self.first_line {
            self.first_line = cursor.line;
        }
        let cursor_text = buffer.line(cursor.line).unwrap_or_default();
        let cursor_vis = rendered_col(&cursor_text, cursor.col, req.tab_size);
        let tw = text_width.max(1) as usize;
        let cursor_row_in_line = if req.soft_wrap { cursor_vis / tw } else { 0 };
        let height = self.height as usize;
        while self.first_line < cursor.line {
            let rows: usize = (self.first_line..cursor.line)
                .map(|l| self.line_rows(buffer, l, text_width, req))
                .sum();
            if rows + cursor_row_in_line < height {
                break;
            }
            self.first_line += 1;
        }
        if req.soft_wrap {
            self.first_col = 0;
        } else if cursor_vis < self.first_col {
            self.first_col = cursor_vis;
        } else if cursor_vis >= self.first_col + tw {
            self.first_col = cursor_vis + 1 - tw;
        }
    }

    /// Maps a rendered column inside a logical line to (row offset, x) in the text
    /// area, or `None` when it falls outside the horizontal window.
    fn place(&self, vis: usize, ctx: &LineCtx<'_>) -> Option<(usize, u16)> {
        let tw = ctx.text_width as usize;
        if ctx.req.soft_wrap {
            return Some((vis / tw, (vis % tw) as u16));
        }
        if vis < self.first_col || vis >= self.first_col + tw {
            return None;
        }
        Some((0, (vis - self.first_col) as u16))
    }

    fn push_cell_styles(&mut self, row: u16, x: u16, w: u16, pos: Position, in_match: bool, ctx: &LineCtx<'_>) {
        let start_col = ctx.gutter + x;
        let end_col = start_col + w;
        let mut push = |attr| {
            self.styles.push(StyleSpan {
                row,
                start_col,
                end_col,
                attr,
            })
        };
        if ctx.selection.is_some_and(|(s, e)| s <= pos && pos < e) {
            push(StyleAttr::Selection);
        }
        if in_match {
            push(StyleAttr::Highlight);
        }
        if ctx.req.focused && pos == ctx.req.cursor {
            push(StyleAttr::Cursor);
        }
    }

    /// Compose one logical line starting at screen row `row`. Returns rows used.
    fn compose_line(&mut self, buffer: &Buffer, line: usize, row: u16, matches: &[Match], ctx: &LineCtx<'_>) -> usize {
        if ctx.gutter > 0 {
            let label = format!("{:>width$} ", line + 1, width = ctx.gutter as usize - 1);
            for (i, ch) in label.chars().enumerate() {
                self.frame
                    .set_cluster(i as u16, row, ch.encode_utf8(&mut [0; 4]), 1, CellFlags::empty());
            }
            self.styles.push(StyleSpan {
                row,
                start_col: 0,
                end_col: ctx.gutter,
                attr: StyleAttr::Gutter,
            });
        }
        let text = buffer.line(line).unwrap_or_default();
        let tw = ctx.text_width;
        let mut vis = 0usize;
        let mut rows_used = 1usize;
        let mut col = 0usize;
        for ch in text.chars() {
            let w = char_width(ch, vis, ctx.req.tab_size);
            if let Some((dr, x)) = self.place(vis, ctx) {
                rows_used = rows_used.max(dr + 1);
                let y = row as usize + dr;
                if y < self.height as usize {
                    let y = y as u16;
                    let cw = (w as u16).min(tw - x);
                    let gx = ctx.gutter + x;
                    if ch == '\t' {
                        for dx in 0..cw {
                            self.frame.set_cluster(gx + dx, y, " ", 1, CellFlags::empty());
                        }
                    } else {
                        self.frame
                            .set_cluster(gx, y, ch.encode_utf8(&mut [0; 4]), cw, CellFlags::empty());
                    }
                    let in_match = matches.iter().any(|m| m.start.col <= col && col < m.end.col);
                    self.push_cell_styles(y, x, cw, Position::new(line, col), in_match, ctx);
                }
            }
            vis += w;
            col += 1;
        }
        // Cell after the last character: cursor target and selected newline.
        if let Some((dr, x)) = self.place(vis, ctx) {
            rows_used = rows_used.max(dr + 1);
            let y = row as usize + dr;
            if y < self.height as usize {
                self.push_cell_styles(y as u16, x, 1, Position::new(line, col), false, ctx);
            }
        }
        rows_used
    }

    fn highlight_matches(buffer: &Buffer, line: usize, searcher: Option<&Searcher>) -> Vec<Match> {
        match (searcher, buffer.line(line)) {
            (Some(s), Some(text)) => s.find_in_line(line, &text),
            _ => Vec::new(),
        }
    }
}

impl<W: Write> Screen for TextScreen<W> {
    fn configure(&mut self, height: u16, width: u16, show_line_numbers: bool) {
        self.height = height;
        self.width = width;
        self.show_line_numbers = show_line_numbers;
        self.first_line = 0;
        self.first_col = 0;
        self.frame = Frame::new(width, height);
        self.rendered = false;
    }

    fn resize(&mut self, height: u16, width: u16) {
        self.height = height;
        self.width = width;
        self.frame = Frame::new(width, height);
        self.rendered = false;
    }

    fn toggle_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
    }

    fn render(&mut self, buffer: &Buffer, request: &RenderRequest) {
        self.frame = Frame::new(self.width, self.height);
        self.styles.clear();
        let gutter = gutter_width(buffer.line_count(), self.show_line_numbers).min(self.width);
        let text_width = self.width - gutter;
        self.rendered = true;
        if text_width == 0 || self.height == 0 {
            trace!(target: "render", width = self.width, gutter, "no_text_area");
            return;
        }
        self.scroll_to_cursor(buffer, request, text_width);

        let searcher = match &request.highlight {
            Some(h) if request.stylize => Searcher::new(&h.text, h.flags).ok(),
            _ => None,
        };
        let ctx = LineCtx {
            req: request,
            selection: request
                .selection
                .map(|s| self.selection_endpoints(s.start, s.end)),
            gutter,
            text_width,
        };
        let mut row = 0usize;
        let mut line = self.first_line;
        while row < self.height as usize && line < buffer.line_count() {
            let matches = Self::highlight_matches(buffer, line, searcher.as_ref());
            row += self.compose_line(buffer, line, row as u16, &matches, &ctx);
            line += 1;
        }
        for span in &self.styles.spans {
            self.frame
                .apply_flags_span(span.start_col, span.row, span.width(), span.attr.flags());
        }
        trace!(target: "render", first_line = self.first_line, last_line = line, spans = self.styles.spans.len(), "composed");
    }

    fn draw(&mut self, top: u16, left: u16) -> Result<()> {
        if !self.rendered {
            warn!(target: "render", "draw_before_render");
            return Ok(());
        }
        let mut w = Writer::new();
        for y in 0..self.frame.height {
            w.move_to(left, top + y);
            let mut current = CellFlags::empty();
            w.style(current);
            for (cluster, _, flags, _) in self.frame.row_leaders(y) {
                if flags != current {
                    w.style(flags);
                    current = flags;
                }
                w.print(cluster);
            }
        }
        w.style(CellFlags::empty());
        w.flush_to(&mut self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HighlightPayload, SelectionPayload};
    use core_search::SearchFlags;
    use pretty_assertions::assert_eq;

    fn buf(s: &str) -> Buffer {
        Buffer::from_str("t", s).unwrap()
    }

    fn req(cursor: Position) -> RenderRequest {
        RenderRequest {
            cursor,
            tab_size: 4,
            soft_wrap: false,
            hard_wrap: false,
            selection: None,
            highlight: None,
            focused: true,
            stylize: true,
        }
    }

    fn screen(h: u16, w: u16, numbers: bool) -> TextScreen<Vec<u8>> {
        let mut s = TextScreen::new(Vec::new());
        s.configure(h, w, numbers);
        s
    }

    #[test]
    fn gutter_and_text_layout() {
        let mut s = screen(3, 12, true);
        s.render(&buf("ab\ncd"), &req(Position::new(0, 0)));
        let f = s.last_frame();
        assert_eq!(f.row_text(0), "  1 ab      ");
        assert_eq!(f.row_text(1), "  2 cd      ");
        assert_eq!(f.row_text(2), "            ");
        assert_eq!(f.flagged_columns(0, CellFlags::GUTTER), vec![0, 1, 2, 3]);
        assert_eq!(f.flagged_columns(0, CellFlags::CURSOR), vec![4]);
    }

    #[test]
    fn tabs_expand_to_next_stop() {
        let mut s = screen(1, 10, false);
        s.render(&buf("a\tb"), &req(Position::new(0, 2)));
        let f = s.last_frame();
        assert_eq!(f.row_text(0), "a   b     ");
        assert_eq!(f.flagged_columns(0, CellFlags::CURSOR), vec![4]);
    }

    #[test]
    fn soft_wrap_splits_long_lines() {
        let mut s = screen(3, 4, false);
        let mut r = req(Position::new(0, 5));
        r.soft_wrap = true;
        s.render(&buf("abcdef\nx"), &r);
        let f = s.last_frame();
        assert_eq!(f.row_text(0), "abcd");
        assert_eq!(f.row_text(1), "ef  ");
        assert_eq!(f.row_text(2), "x   ");
        assert_eq!(f.flagged_columns(1, CellFlags::CURSOR), vec![1]);
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let mut s = screen(2, 5, false);
        s.render(&buf("l0\nl1\nl2\nl3"), &req(Position::new(3, 0)));
        assert_eq!(s.first_line(), 2);
        assert_eq!(s.last_frame().row_text(0), "l2   ");
        s.render(&buf("l0\nl1\nl2\nl3"), &req(Position::new(0, 1)));
        assert_eq!(s.first_line(), 0);
    }

    #[test]
    fn horizontal_window_follows_cursor_without_soft_wrap() {
        let mut s = screen(1, 3, false);
        s.render(&buf("abcdef"), &req(Position::new(0, 5)));
        assert_eq!(s.last_frame().row_text(0), "def");
        assert_eq!(s.last_frame().flagged_columns(0, CellFlags::CURSOR), vec![2]);
    }

    #[test]
    fn selection_box_uses_normalized_endpoints() {
        let mut s = screen(2, 6, false);
        let mut r = req(Position::new(0, 1));
        r.selection = Some(SelectionPayload {
            start: Position::new(1, 1),
            end: Position::new(0, 1),
        });
        s.render(&buf("abc\ndef"), &r);
        let f = s.last_frame();
        // (0,1)..(0,3) plus the newline cell, then (1,0).
        assert_eq!(f.flagged_columns(0, CellFlags::SELECTION), vec![1, 2, 3]);
        assert_eq!(f.flagged_columns(1, CellFlags::SELECTION), vec![0]);
    }

    #[test]
    fn highlight_marks_every_match_when_stylized() {
        let mut s = screen(1, 12, false);
        let mut r = req(Position::new(0, 0));
        r.focused = false;
        r.highlight = Some(HighlightPayload {
            text: "ab".into(),
            flags: SearchFlags::LITERAL,
        });
        s.render(&buf("ab xAB ab"), &r);
        assert_eq!(
            s.last_frame().flagged_columns(0, CellFlags::HIGHLIGHT),
            vec![0, 1, 4, 5, 7, 8]
        );

        r.stylize = false;
        s.render(&buf("ab xAB ab"), &r);
        assert!(s.last_frame().flagged_columns(0, CellFlags::HIGHLIGHT).is_empty());
    }

    #[test]
    fn unfocused_screen_has_no_cursor() {
        let mut s = screen(1, 5, false);
        let mut r = req(Position::new(0, 0));
        r.focused = false;
        s.render(&buf("abc"), &r);
        assert!(s.last_frame().flagged_columns(0, CellFlags::CURSOR).is_empty());
    }

    #[test]
    fn draw_emits_frame_text() {
        let mut s = screen(1, 6, false);
        s.render(&buf("hi"), &req(Position::new(0, 2)));
        s.draw(0, 0).unwrap();
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("hi"));
    }

    #[test]
    fn draw_before_render_is_noop() {
        let mut s = screen(1, 6, false);
        s.draw(0, 0).unwrap();
        assert!(s.output().is_empty());
    }
}
