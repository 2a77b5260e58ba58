//! Render request assembly.
//!
//! Highlight-source resolution (exactly one source, or none):
//! 1. Find session active: its query and its own flags. A selection never
//!    contributes a text highlight while searching.
//! 2. Otherwise, an active selection whose normalized endpoints share one line and
//!    differ: the selected text, matched as a literal case-insensitive echo.
//! 3. Otherwise none. A multi-line selection is drawn only as a box.
//!
//! The selection payload is passed in anchor order whenever a selection is active,
//! independent of which highlight source won.

use core_render::{HighlightPayload, RenderRequest, SelectionPayload};
use core_search::SearchFlags;
use core_text::Buffer;

use crate::Editor;

pub fn resolve_highlight(editor: &Editor, buffer: &Buffer) -> Option<HighlightPayload> {
    if editor.find().is_active() {
        return editor
            .find()
            .highlight()
            .map(|(query, flags)| HighlightPayload {
                text: query.to_string(),
                flags,
            });
    }
    let (start, end) = editor.selection.normalized()?;
    if start.line != end.line || start == end {
        return None;
    }
    Some(HighlightPayload {
        text: buffer.slice(start, end),
        flags: SearchFlags::LITERAL,
    })
}

pub fn build_render_request(editor: &Editor, buffer: &Buffer) -> RenderRequest {
    let wrap = editor.wrap();
    RenderRequest {
        cursor: editor.cursor,
        tab_size: editor.tab_size,
        soft_wrap: wrap.soft,
        hard_wrap: wrap.hard,
        selection: editor
            .selection
            .anchors()
            .map(|(start, end)| SelectionPayload { start, end }),
        highlight: resolve_highlight(editor, buffer),
        focused: editor.is_focused(),
        stylize: editor.stylize(),
    }
}
