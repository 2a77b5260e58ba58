mod common;

use common::*;
use core_config::EditorOptions;
use core_model::EditorModel;
use core_search::SearchFlags;
use core_state::Geometry;
use core_text::{Buffer, Position};
use pretty_assertions::assert_eq;

fn p(line: usize, col: usize) -> Position {
    Position::new(line, col)
}

#[test]
fn status_labels_follow_cursor_and_selection() {
    let (mut m, _, v) = model_with("hello world\nsecond line", 1);
    assert_eq!(m.selection_length_label(v[0]), "");
    m.editor_mut(v[0]).unwrap().cursor = p(1, 2);
    assert_eq!(m.cursor_label(v[0]).as_deref(), Some("Ln 2, Col 3"));
    assert_eq!(m.info(v[0]).unwrap().status_line(), "notes.txt | Ln 2, Col 3");

    select(&mut m, v[0], p(0, 6), p(0, 11));
    assert_eq!(m.selection_length_label(v[0]), "5 selected");
    // Newline counts as one char.
    select(&mut m, v[0], p(1, 1), p(0, 10));
    assert_eq!(m.selection_length_label(v[0]), "3 selected");
    assert_eq!(m.selected_text(v[0]).as_deref(), Some("d\ns"));
}

#[test]
fn info_reports_search_progress() {
    let (mut m, b, v) = model_with("foo foo", 1);
    m.find_next(v[0], "foo", SearchFlags::LITERAL).unwrap();
    let info = m.info(v[0]).unwrap();
    assert_eq!(info.buffer, Some(b));
    assert!(info.find_active);
    assert_eq!(info.search_text.as_deref(), Some("foo"));
    assert_eq!(info.matches, Some((Some(0), 2)));
    assert_eq!(info.status_line(), "notes.txt | Ln 1, Col 1 | match 1/2");
}

#[test]
fn detached_editor_degrades_gracefully() {
    let mut m = EditorModel::new();
    let v = m.create_editor(GEOMETRY, screen(), &opts());
    assert_eq!(m.selection_length_label(v), "");
    assert_eq!(m.file_size(v), None);
    assert_eq!(m.selected_text(v), None);
    assert!(!m.shift_selection_right(v));
    assert_eq!(m.info(v).unwrap().status_line(), "[No Name] | Ln 1, Col 1");
    assert_eq!(m.cursor_label(core_model::ViewId(42)), None);
}

#[test]
fn delete_selected_text_broadcasts() {
    let (mut m, b, v) = model_with("hello world", 2);
    m.editor_mut(v[1]).unwrap().cursor = p(0, 11);
    select(&mut m, v[0], p(0, 11), p(0, 5));
    assert_eq!(m.delete_selected_text(v[0]).as_deref(), Some(" world"));
    assert_eq!(text(&m, b), "hello");
    assert_eq!(cursor(&m, v[0]), p(0, 5));
    assert!(!m.editor(v[0]).unwrap().selection.is_active());
    assert_eq!(cursor(&m, v[1]), Position::origin());
    assert_eq!(m.delete_selected_text(v[0]), None);
}

#[test]
fn shifting_lines_moves_selection_with_text() {
    let (mut m, b, v) = model_with("a\nb\nc", 1);
    select(&mut m, v[0], p(0, 0), p(1, 1));
    assert!(m.shift_selection_right(v[0]));
    assert_eq!(text(&m, b), "\ta\n\tb\nc");
    let e = m.editor(v[0]).unwrap();
    assert_eq!(e.selection.anchors(), Some((p(0, 1), p(1, 2))));
    assert_eq!(e.cursor, p(1, 2));

    assert!(m.shift_selection_left(v[0]));
    assert_eq!(text(&m, b), "a\nb\nc");
    assert_eq!(cursor(&m, v[0]), p(1, 1));
    assert!(!m.shift_selection_left(v[0]));

    assert!(m.undo(v[0]));
    assert_eq!(text(&m, b), "\ta\n\tb\nc");
    assert!(m.undo(v[0]));
    assert_eq!(text(&m, b), "a\nb\nc");
}

#[test]
fn outdent_removes_up_to_tab_size_spaces() {
    let (mut m, b, v) = model_with("      x", 1);
    m.editor_mut(v[0]).unwrap().cursor = p(0, 6);
    assert!(m.shift_selection_left(v[0]));
    assert_eq!(text(&m, b), "  x");
    assert_eq!(cursor(&m, v[0]), p(0, 2));
}

#[test]
fn leading_whitespace_raw_and_rendered() {
    let (m, _, v) = model_with("\t  x\nplain", 1);
    assert_eq!(m.leading_whitespace(v[0], 0).as_deref(), Some("\t  "));
    assert_eq!(m.leading_whitespace_rendered(v[0], 0), Some(6));
    assert_eq!(m.leading_whitespace(v[0], 1).as_deref(), Some(""));
    assert_eq!(m.leading_whitespace(v[0], 9), None);
}

#[test]
fn file_size_counts_bytes() {
    let (m, _, v) = model_with("héllo", 1);
    assert_eq!(m.file_size(v[0]), Some(6));
}

#[test]
fn selection_endpoints_are_document_ordered() {
    let (mut m, _, v) = model_with("one\ntwo\nthree", 1);
    assert_eq!(m.selection_endpoints(v[0]), None);
    select(&mut m, v[0], p(2, 1), p(0, 3));
    assert_eq!(m.selection_endpoints(v[0]), Some((p(0, 3), p(2, 1))));
}

#[test]
fn resize_resets_only_on_change_or_force() {
    let (mut m, _, v) = model_with("abc\ndef", 1);
    m.editor_mut(v[0]).unwrap().cursor = p(1, 1);
    assert!(!m.resize(v[0], GEOMETRY, false));
    assert_eq!(cursor(&m, v[0]), p(1, 1));

    assert!(m.resize(v[0], Geometry::new(0, 0, 12, 30), false));
    assert_eq!(cursor(&m, v[0]), Position::origin());
    assert_eq!(m.editor(v[0]).unwrap().geometry(), Geometry::new(0, 0, 12, 30));

    m.editor_mut(v[0]).unwrap().cursor = p(1, 1);
    let renders = m.editor(v[0]).unwrap().renders();
    assert!(m.resize(v[0], Geometry::new(0, 0, 12, 30), true));
    assert_eq!(cursor(&m, v[0]), Position::origin());
    assert_eq!(m.editor(v[0]).unwrap().renders(), renders + 1);
}

#[test]
fn hard_wrap_reflows_to_editor_width() {
    let mut m = EditorModel::new();
    let b = m.add_buffer(Buffer::from_str("w", "aaaa bbbb cccc").unwrap());
    let v = m.create_editor(Geometry::new(0, 0, 5, 10), screen(), &opts());
    m.set_buffer(v, b);
    m.set_wrap(v, false, true);
    assert_eq!(text(&m, b), "aaaa bbbb\ncccc");
    assert!(m.editor(v).unwrap().wrap().hard);

    // Already fits: no new undo step.
    m.set_wrap(v, false, true);
    assert!(m.undo(v));
    assert_eq!(text(&m, b), "aaaa bbbb cccc");
    assert!(!m.undo(v));
}

#[test]
fn undo_and_redo_restore_text() {
    let (mut m, b, v) = model_with("one", 1);
    assert!(!m.undo(v[0]));
    assert!(!m.redo(v[0]));
    select(&mut m, v[0], p(0, 0), p(0, 3));
    m.delete_selected_text(v[0]);
    assert_eq!(text(&m, b), "");
    assert!(m.undo(v[0]));
    assert_eq!(text(&m, b), "one");
    assert!(!m.editor(v[0]).unwrap().selection.is_active());
    assert!(m.redo(v[0]));
    assert_eq!(text(&m, b), "");
}

#[test]
fn undo_from_another_editor_keeps_that_editors_cursor() {
    let (mut m, b, v) = model_with("abc\nhello world", 2);
    select(&mut m, v[0], p(1, 5), p(1, 11));
    m.delete_selected_text(v[0]);
    assert_eq!(text(&m, b), "abc\nhello");
    assert_eq!(cursor(&m, v[0]), p(1, 5));

    m.editor_mut(v[1]).unwrap().cursor = p(0, 1);
    assert!(m.undo(v[1]));
    assert_eq!(text(&m, b), "abc\nhello world");
    assert_eq!(cursor(&m, v[1]), p(0, 1));
    assert_eq!(cursor(&m, v[0]), p(1, 5));
}

#[test]
fn undo_from_another_editor_clamps_its_cursor() {
    let (mut m, b, v) = model_with("abc", 2);
    m.editor_mut(v[0]).unwrap().cursor = p(0, 3);
    m.shift_selection_right(v[0]);
    assert_eq!(text(&m, b), "\tabc");
    m.editor_mut(v[1]).unwrap().cursor = p(0, 4);
    assert!(m.undo(v[1]));
    assert_eq!(text(&m, b), "abc");
    assert_eq!(cursor(&m, v[1]), p(0, 3));
}

#[test]
fn hard_wrap_accounts_for_a_gutter_widened_by_the_reflow() {
    let mut m = EditorModel::new();
    let body = format!("{}aaaaa bbbb ccccc", "x\n".repeat(998));
    let b = m.add_buffer(Buffer::from_str("w", &body).unwrap());
    let v = m.create_editor(Geometry::new(0, 0, 5, 14), screen(), &EditorOptions::default());
    m.set_buffer(v, b);
    assert_eq!(m.editor(v).unwrap().text_width(m.buffer(b).unwrap()), 10);

    m.set_wrap(v, false, true);
    let buffer = m.buffer(b).unwrap();
    let width = m.editor(v).unwrap().text_width(buffer);
    assert_eq!(width, 9);
    assert!(buffer.line_count() >= 1000);
    for line in 0..buffer.line_count() {
        assert!(buffer.line_len(line) <= width, "line {line} overflows");
    }
    assert_eq!(buffer.line(buffer.line_count() - 1).as_deref(), Some("ccccc"));
}
