//! Status bar strings.
//!
//! Format: `<name> | Ln X, Col Y[ | N selected][ | match I/M]`.
//! * `Ln`/`Col` are 1-based; `Col` counts characters, not rendered columns.
//! * The selection segment appears only while a selection is active (even if empty).
//! * The match segment appears only while a find session is active; `I` is `-` when
//!   no match is current yet.
//!
//! `compose_status` produces ordered segments; `format_status` joins them. Hosts that
//! lay out their own status bar can consume the segments directly.

use core_text::Position;

pub struct StatusContext<'a> {
    pub name: &'a str,
    pub cursor: Position,
    /// Selected character count while a selection is active.
    pub selected: Option<usize>,
    /// `(current index, total)` while a find session is active.
    pub find: Option<(Option<usize>, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Name(&'a str),
    Cursor(String),
    Selection(String),
    Matches { current: Option<usize>, total: usize },
}

/// `"{n} selected"` while a selection is active, empty otherwise.
pub fn selection_label(selected: Option<usize>) -> String {
    match selected {
        Some(n) => format!("{n} selected"),
        None => String::new(),
    }
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut segs = vec![
        StatusSegment::Name(ctx.name),
        StatusSegment::Cursor(ctx.cursor.to_string()),
    ];
    if ctx.selected.is_some() {
        segs.push(StatusSegment::Selection(selection_label(ctx.selected)));
    }
    if let Some((current, total)) = ctx.find {
        segs.push(StatusSegment::Matches { current, total });
    }
    segs
}

pub fn format_status(ctx: &StatusContext<'_>) -> String {
    compose_status(ctx)
        .into_iter()
        .map(|seg| match seg {
            StatusSegment::Name(n) => n.to_string(),
            StatusSegment::Cursor(s) | StatusSegment::Selection(s) => s,
            StatusSegment::Matches {
                current: Some(i),
                total,
            } => format!("match {}/{}", i + 1, total),
            StatusSegment::Matches {
                current: None,
                total,
            } => format!("match -/{total}"),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels() {
        assert_eq!(selection_label(None), "");
        assert_eq!(selection_label(Some(0)), "0 selected");
        assert_eq!(selection_label(Some(12)), "12 selected");
    }

    #[test]
    fn status_segments_follow_state() {
        let plain = StatusContext {
            name: "notes.txt",
            cursor: Position::new(2, 7),
            selected: None,
            find: None,
        };
        assert_eq!(format_status(&plain), "notes.txt | Ln 3, Col 8");

        let busy = StatusContext {
            selected: Some(4),
            find: Some((Some(1), 3)),
            ..plain
        };
        assert_eq!(
            format_status(&busy),
            "notes.txt | Ln 3, Col 8 | 4 selected | match 2/3"
        );

        let fresh = StatusContext {
            find: Some((None, 5)),
            ..plain
        };
        assert_eq!(format_status(&fresh), "notes.txt | Ln 3, Col 8 | match -/5");
    }
}
