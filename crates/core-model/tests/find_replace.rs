mod common;

use common::*;
use core_search::{Match, SearchError, SearchFlags};
use core_text::Position;
use pretty_assertions::assert_eq;

fn m(line: usize, col: usize, len: usize) -> Match {
    Match {
        start: Position::new(line, col),
        end: Position::new(line, col + len),
    }
}

const TEXT: &str = "foo bar\nfoo\nxfoo";

#[test]
fn find_next_cycles_through_matches() {
    let (mut model, _, v) = model_with(TEXT, 1);
    let f = SearchFlags::LITERAL;
    assert_eq!(model.find_all(v[0], "foo", f).unwrap(), 3);
    let seen: Vec<_> = (0..4)
        .map(|_| model.find_next(v[0], "foo", f).unwrap().unwrap())
        .collect();
    assert_eq!(seen, vec![m(0, 0, 3), m(1, 0, 3), m(2, 1, 3), m(0, 0, 3)]);
    assert_eq!(cursor(&model, v[0]), Position::new(0, 0));
}

#[test]
fn find_next_from_idle_reenters_searching() {
    let (mut model, _, v) = model_with(TEXT, 1);
    let found = model.find_next(v[0], "foo", SearchFlags::LITERAL).unwrap();
    assert_eq!(found, Some(m(0, 0, 3)));
    assert!(model.editor(v[0]).unwrap().find().is_active());
}

#[test]
fn find_previous_from_idle_wraps_to_last() {
    let (mut model, _, v) = model_with(TEXT, 1);
    let f = SearchFlags::LITERAL;
    assert_eq!(model.find_previous(v[0], "foo", f).unwrap(), Some(m(2, 1, 3)));
    assert_eq!(model.find_previous(v[0], "foo", f).unwrap(), Some(m(1, 0, 3)));
    assert_eq!(cursor(&model, v[0]), Position::new(1, 0));
}

#[test]
fn changed_flags_restart_the_search() {
    let (mut model, _, v) = model_with("Foo foo", 1);
    model.find_next(v[0], "foo", SearchFlags::LITERAL).unwrap();
    model.find_next(v[0], "foo", SearchFlags::LITERAL).unwrap();
    let cased = SearchFlags::new(true, false, false);
    assert_eq!(model.find_next(v[0], "foo", cased).unwrap(), Some(m(0, 4, 3)));
    assert_eq!(model.editor(v[0]).unwrap().find().matches().len(), 1);
}

#[test]
fn whole_word_and_regex_flags_are_forwarded() {
    let (mut model, _, v) = model_with("cat concat cat1 cat", 1);
    let words = SearchFlags::new(false, true, false);
    assert_eq!(model.find_all(v[0], "cat", words).unwrap(), 2);
    let regex = SearchFlags::new(false, false, true);
    assert_eq!(model.find_all(v[0], r"cat\d", regex).unwrap(), 1);
}

#[test]
fn invalid_pattern_is_reported_and_state_kept() {
    let (mut model, _, v) = model_with(TEXT, 1);
    model.find_all(v[0], "bar", SearchFlags::LITERAL).unwrap();
    model.editor_mut(v[0]).unwrap().cursor = Position::new(1, 1);

    let err = model
        .find_all(v[0], "(", SearchFlags::new(false, false, true))
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidPattern { .. }));
    let e = model.editor(v[0]).unwrap();
    assert_eq!(e.cursor, Position::new(1, 1));
    assert!(e.find().is_active());
    assert_eq!(e.find().query(), Some("bar"));

    let err = model.replace_all(v[0], "", "x", SearchFlags::LITERAL).unwrap_err();
    assert!(matches!(err, SearchError::EmptyQuery));
    assert_eq!(text(&model, model.editor(v[0]).unwrap().buffer().unwrap()), TEXT);
}

#[test]
fn cancel_returns_to_idle_and_keeps_query() {
    let (mut model, _, v) = model_with(TEXT, 1);
    model.find_all(v[0], "foo", SearchFlags::LITERAL).unwrap();
    model.cancel_find(v[0]);
    let e = model.editor(v[0]).unwrap();
    assert!(!e.find().is_active());
    assert!(e.find().matches().is_empty());
    assert_eq!(e.find().query(), Some("foo"));
    assert_eq!(e.last_render().unwrap().highlight, None);
}

#[test]
fn replace_next_replaces_current_and_advances() {
    let (mut model, b, v) = model_with("foo foo", 1);
    let f = SearchFlags::LITERAL;
    let next = model.replace_next(v[0], "foo", "bar", f).unwrap();
    assert_eq!(text(&model, b), "bar foo");
    assert_eq!(next, Some(m(0, 4, 3)));
    assert_eq!(cursor(&model, v[0]), Position::new(0, 4));

    let next = model.replace_next(v[0], "foo", "bar", f).unwrap();
    assert_eq!(text(&model, b), "bar bar");
    assert_eq!(next, None);
    assert_eq!(model.replace_next(v[0], "foo", "bar", f).unwrap(), None);
    assert_eq!(text(&model, b), "bar bar");
}

#[test]
fn replace_next_targets_the_current_match() {
    let (mut model, b, v) = model_with("a1 a2 a3", 1);
    let f = SearchFlags::new(false, false, true);
    model.find_next(v[0], r"a\d", f).unwrap();
    model.find_next(v[0], r"a\d", f).unwrap();
    model.replace_next(v[0], r"a\d", "Z", f).unwrap();
    assert_eq!(text(&model, b), "a1 Z a3");
}

#[test]
fn replace_all_with_same_text_is_idempotent() {
    let (mut model, b, v) = model_with("foo x foo\nfoo", 1);
    let f = SearchFlags::LITERAL;
    let before = text(&model, b);
    assert_eq!(model.replace_all(v[0], "foo", "foo", f).unwrap(), 3);
    assert_eq!(text(&model, b), before);
    assert_eq!(model.editor(v[0]).unwrap().find().matches().len(), 3);
    assert_eq!(model.find_all(v[0], "foo", f).unwrap(), 3);
}

#[test]
fn replace_all_keeps_case_differing_matches_of_the_same_term() {
    let (mut model, b, v) = model_with("Foo x foo\nFOO", 1);
    let f = SearchFlags::LITERAL;
    assert!(!f.match_case);
    assert_eq!(model.replace_all(v[0], "foo", "foo", f).unwrap(), 3);
    assert_eq!(text(&model, b), "Foo x foo\nFOO");
    assert_eq!(model.editor(v[0]).unwrap().find().matches().len(), 3);
}

#[test]
fn replace_all_rewrites_only_differing_matches() {
    let (mut model, b, v) = model_with("Foo x foo", 1);
    assert_eq!(
        model.replace_all(v[0], "foo", "Foo", SearchFlags::LITERAL).unwrap(),
        2
    );
    assert_eq!(text(&model, b), "Foo x Foo");
    assert!(model.undo(v[0]));
    assert_eq!(text(&model, b), "Foo x foo");
}

#[test]
fn replace_all_without_changes_records_no_undo_step() {
    let (mut model, b, v) = model_with("foo", 1);
    assert_eq!(
        model.replace_all(v[0], "foo", "foo", SearchFlags::LITERAL).unwrap(),
        1
    );
    assert!(!model.undo(v[0]));
    assert_eq!(text(&model, b), "foo");
}

#[test]
fn replace_all_is_one_undo_step() {
    let (mut model, b, v) = model_with("a foo b foo", 1);
    assert_eq!(
        model.replace_all(v[0], "foo", "x", SearchFlags::LITERAL).unwrap(),
        2
    );
    assert_eq!(text(&model, b), "a x b x");
    assert!(model.undo(v[0]));
    assert_eq!(text(&model, b), "a foo b foo");
    assert!(model.redo(v[0]));
    assert_eq!(text(&model, b), "a x b x");
}

#[test]
fn replace_broadcasts_to_sibling_viewers() {
    let (mut model, b, v) = model_with("foofoofoo!", 2);
    model.editor_mut(v[1]).unwrap().cursor = Position::new(0, 10);
    model.replace_all(v[0], "foo", "", SearchFlags::LITERAL).unwrap();
    assert_eq!(text(&model, b), "!");
    assert_eq!(cursor(&model, v[1]), Position::origin());
}

#[test]
fn sibling_search_follows_edits() {
    let (mut model, _, v) = model_with("foo foo", 2);
    model.find_all(v[1], "foo", SearchFlags::LITERAL).unwrap();
    model
        .replace_next(v[0], "foo", "bar", SearchFlags::LITERAL)
        .unwrap();
    assert_eq!(
        model.editor(v[1]).unwrap().find().matches().matches(),
        &[m(0, 4, 3)]
    );
}
