//! core-keymap: key code classification table.
//!
//! Design principles:
//! - Pure and deterministic: classification depends only on the table contents.
//!   There is no process-wide mutable binding state; callers own a `KeyBindings`
//!   (or any `KeyClassifier`) and inject it into the dispatcher.
//! - Closed category set: `Binding` enumerates every semantic key the editing core
//!   understands. Each binding maps to a small list of integer key codes
//!   (curses-compatible numbering by default).
//! - Key codes are plain integers; `KeyCode::NONE` (-1) is the "no key" sentinel
//!   delivered by a non-blocking input poll.

use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

/// Raw input key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Sentinel for "no key available".
    pub const NONE: KeyCode = KeyCode(-1);

    pub fn is_none(self) -> bool {
        self.0 < 0
    }

    /// Decode as a character (codes below 0 or outside the scalar range yield None).
    pub fn as_char(self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }
}

impl From<i32> for KeyCode {
    fn from(v: i32) -> Self {
        KeyCode(v)
    }
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        KeyCode(c as i32)
    }
}

/// Default key codes (curses numbering for special keys, ASCII for control chars).
pub mod codes {
    pub const CTRL_A: i32 = 1;
    pub const BACKSPACE_ASCII: i32 = 8;
    pub const TAB: i32 = 9;
    pub const LINE_FEED: i32 = 10;
    pub const CARRIAGE_RETURN: i32 = 13;
    pub const CTRL_Y: i32 = 25;
    pub const CTRL_Z: i32 = 26;
    pub const DELETE_ASCII: i32 = 127;
    pub const KEY_DOWN: i32 = 258;
    pub const KEY_UP: i32 = 259;
    pub const KEY_LEFT: i32 = 260;
    pub const KEY_RIGHT: i32 = 261;
    pub const KEY_HOME: i32 = 262;
    pub const KEY_BACKSPACE: i32 = 263;
    pub const KEY_DC: i32 = 330;
    pub const KEY_SF: i32 = 336; // shift+down
    pub const KEY_SR: i32 = 337; // shift+up
    pub const KEY_NPAGE: i32 = 338;
    pub const KEY_PPAGE: i32 = 339;
    pub const KEY_ENTER: i32 = 343;
    pub const KEY_BTAB: i32 = 353;
    pub const KEY_END: i32 = 360;
    pub const KEY_SEND: i32 = 386;
    pub const KEY_SHOME: i32 = 391;
    pub const KEY_SLEFT: i32 = 393;
    pub const KEY_SNEXT: i32 = 396; // shift+page-down
    pub const KEY_SPREVIOUS: i32 = 398; // shift+page-up
    pub const KEY_SRIGHT: i32 = 402;
    pub const CTRL_END: i32 = 530;
    pub const CTRL_HOME: i32 = 535;
    pub const CTRL_LEFT: i32 = 545;
    pub const CTRL_RIGHT: i32 = 560;
}

/// Semantic key categories understood by the editing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    DeleteCharacterLeft,
    DeleteCharacterRight,
    MoveCursorToLineStart,
    MoveCursorToLineEnd,
    SelectTillLineStart,
    SelectTillLineEnd,
    MoveCursorToDocumentStart,
    MoveCursorToDocumentEnd,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorUp,
    MoveCursorDown,
    MoveToPreviousPage,
    MoveToNextPage,
    SelectPageAbove,
    SelectPageBelow,
    SelectCharacterLeft,
    SelectCharacterRight,
    SelectLineAbove,
    SelectLineBelow,
    MoveCursorToPreviousWord,
    MoveCursorToNextWord,
    InsertTab,
    DecreaseIndent,
    Newline,
    SelectAll,
    Undo,
    Redo,
}

impl Binding {
    pub const COUNT: usize = 28;

    pub const ALL: [Binding; Binding::COUNT] = [
        Binding::DeleteCharacterLeft,
        Binding::DeleteCharacterRight,
        Binding::MoveCursorToLineStart,
        Binding::MoveCursorToLineEnd,
        Binding::SelectTillLineStart,
        Binding::SelectTillLineEnd,
        Binding::MoveCursorToDocumentStart,
        Binding::MoveCursorToDocumentEnd,
        Binding::MoveCursorLeft,
        Binding::MoveCursorRight,
        Binding::MoveCursorUp,
        Binding::MoveCursorDown,
        Binding::MoveToPreviousPage,
        Binding::MoveToNextPage,
        Binding::SelectPageAbove,
        Binding::SelectPageBelow,
        Binding::SelectCharacterLeft,
        Binding::SelectCharacterRight,
        Binding::SelectLineAbove,
        Binding::SelectLineBelow,
        Binding::MoveCursorToPreviousWord,
        Binding::MoveCursorToNextWord,
        Binding::InsertTab,
        Binding::DecreaseIndent,
        Binding::Newline,
        Binding::SelectAll,
        Binding::Undo,
        Binding::Redo,
    ];

    /// Configuration name (SCREAMING_SNAKE_CASE).
    pub fn name(self) -> &'static str {
        match self {
            Binding::DeleteCharacterLeft => "DELETE_CHARACTER_LEFT",
            Binding::DeleteCharacterRight => "DELETE_CHARACTER_RIGHT",
            Binding::MoveCursorToLineStart => "MOVE_CURSOR_TO_LINE_START",
            Binding::MoveCursorToLineEnd => "MOVE_CURSOR_TO_LINE_END",
            Binding::SelectTillLineStart => "SELECT_TILL_LINE_START",
            Binding::SelectTillLineEnd => "SELECT_TILL_LINE_END",
            Binding::MoveCursorToDocumentStart => "MOVE_CURSOR_TO_DOCUMENT_START",
            Binding::MoveCursorToDocumentEnd => "MOVE_CURSOR_TO_DOCUMENT_END",
            Binding::MoveCursorLeft => "MOVE_CURSOR_LEFT",
            Binding::MoveCursorRight => "MOVE_CURSOR_RIGHT",
            Binding::MoveCursorUp => "MOVE_CURSOR_UP",
            Binding::MoveCursorDown => "MOVE_CURSOR_DOWN",
            Binding::MoveToPreviousPage => "MOVE_TO_PREVIOUS_PAGE",
            Binding::MoveToNextPage => "MOVE_TO_NEXT_PAGE",
            Binding::SelectPageAbove => "SELECT_PAGE_ABOVE",
            Binding::SelectPageBelow => "SELECT_PAGE_BELOW",
            Binding::SelectCharacterLeft => "SELECT_CHARACTER_LEFT",
            Binding::SelectCharacterRight => "SELECT_CHARACTER_RIGHT",
            Binding::SelectLineAbove => "SELECT_LINE_ABOVE",
            Binding::SelectLineBelow => "SELECT_LINE_BELOW",
            Binding::MoveCursorToPreviousWord => "MOVE_CURSOR_TO_PREVIOUS_WORD",
            Binding::MoveCursorToNextWord => "MOVE_CURSOR_TO_NEXT_WORD",
            Binding::InsertTab => "INSERT_TAB",
            Binding::DecreaseIndent => "DECREASE_INDENT",
            Binding::Newline => "NEWLINE",
            Binding::SelectAll => "SELECT_ALL",
            Binding::Undo => "UNDO",
            Binding::Redo => "REDO",
        }
    }

    /// Reverse of `name`. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Binding> {
        Binding::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side-effect free key classification seam injected into the dispatcher.
pub trait KeyClassifier {
    fn is_key(&self, code: KeyCode, binding: Binding) -> bool;
}

impl<F> KeyClassifier for F
where
    F: Fn(KeyCode, Binding) -> bool,
{
    fn is_key(&self, code: KeyCode, binding: Binding) -> bool {
        self(code, binding)
    }
}

type CodeList = SmallVec<[i32; 4]>;

/// Binding -> key codes table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    table: Vec<CodeList>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl KeyBindings {
    /// Table with no codes bound at all.
    pub fn empty() -> Self {
        Self {
            table: vec![CodeList::new(); Binding::COUNT],
        }
    }

    /// Built-in bindings.
    pub fn defaults() -> Self {
        use codes::*;
        let mut kb = Self::empty();
        kb.bind(
            Binding::DeleteCharacterLeft,
            &[KEY_BACKSPACE, DELETE_ASCII, BACKSPACE_ASCII],
        );
        kb.bind(Binding::DeleteCharacterRight, &[KEY_DC]);
        kb.bind(Binding::MoveCursorToLineStart, &[KEY_HOME]);
        kb.bind(Binding::MoveCursorToLineEnd, &[KEY_END]);
        kb.bind(Binding::SelectTillLineStart, &[KEY_SHOME]);
        kb.bind(Binding::SelectTillLineEnd, &[KEY_SEND]);
        kb.bind(Binding::MoveCursorToDocumentStart, &[CTRL_HOME]);
        kb.bind(Binding::MoveCursorToDocumentEnd, &[CTRL_END]);
        kb.bind(Binding::MoveCursorLeft, &[KEY_LEFT]);
        kb.bind(Binding::MoveCursorRight, &[KEY_RIGHT]);
        kb.bind(Binding::MoveCursorUp, &[KEY_UP]);
        kb.bind(Binding::MoveCursorDown, &[KEY_DOWN]);
        kb.bind(Binding::MoveToPreviousPage, &[KEY_PPAGE]);
        kb.bind(Binding::MoveToNextPage, &[KEY_NPAGE]);
        kb.bind(Binding::SelectPageAbove, &[KEY_SPREVIOUS]);
        kb.bind(Binding::SelectPageBelow, &[KEY_SNEXT]);
        kb.bind(Binding::SelectCharacterLeft, &[KEY_SLEFT]);
        kb.bind(Binding::SelectCharacterRight, &[KEY_SRIGHT]);
        kb.bind(Binding::SelectLineAbove, &[KEY_SR]);
        kb.bind(Binding::SelectLineBelow, &[KEY_SF]);
        kb.bind(Binding::MoveCursorToPreviousWord, &[CTRL_LEFT]);
        kb.bind(Binding::MoveCursorToNextWord, &[CTRL_RIGHT]);
        kb.bind(Binding::InsertTab, &[TAB]);
        kb.bind(Binding::DecreaseIndent, &[KEY_BTAB]);
        kb.bind(Binding::Newline, &[LINE_FEED, CARRIAGE_RETURN, KEY_ENTER]);
        kb.bind(Binding::SelectAll, &[CTRL_A]);
        kb.bind(Binding::Undo, &[CTRL_Z]);
        kb.bind(Binding::Redo, &[CTRL_Y]);
        kb
    }

    /// Replace the codes bound to `binding`.
    pub fn bind(&mut self, binding: Binding, codes: &[i32]) {
        let slot = &mut self.table[binding as usize];
        slot.clear();
        slot.extend_from_slice(codes);
        debug!(target: "keymap", binding = binding.name(), codes = ?codes, "binding_set");
    }

    pub fn codes(&self, binding: Binding) -> &[i32] {
        &self.table[binding as usize]
    }

    /// Codes claimed by more than one binding, with the bindings involved.
    pub fn conflicts(&self) -> Vec<(i32, Vec<Binding>)> {
        let mut seen: Vec<(i32, Vec<Binding>)> = Vec::new();
        for b in Binding::ALL {
            for &code in self.codes(b) {
                match seen.iter_mut().find(|(c, _)| *c == code) {
                    Some((_, owners)) => owners.push(b),
                    None => seen.push((code, vec![b])),
                }
            }
        }
        seen.retain(|(_, owners)| owners.len() > 1);
        seen
    }
}

impl KeyClassifier for KeyBindings {
    fn is_key(&self, code: KeyCode, binding: Binding) -> bool {
        !code.is_none() && self.codes(binding).contains(&code.0)
    }
}

/// Characters accepted as printable input.
#[derive(Debug, Clone)]
pub struct CharSet {
    extra: String,
}

impl CharSet {
    /// Separator and punctuation characters accepted besides ASCII letters and digits.
    pub const SEPARATORS: &'static str = "~`!@#$%^&*()-_=+\\|[{]};:'\",<.>/? ";

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || self.extra.contains(c)
    }

    pub fn contains_code(&self, code: KeyCode) -> bool {
        code.as_char().is_some_and(|c| self.contains(c))
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self {
            extra: Self::SEPARATORS.to_string(),
        }
    }
}
