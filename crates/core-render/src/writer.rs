//! Terminal writer abstraction.
//!
//! A frame is translated into a flat command list and flushed once, so emission
//! order is fixed before any byte reaches the terminal.
//!
//! Design invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * `Style` always resets attributes before applying the new set, so the
//!   terminal state after a command never depends on what came before it.
//! * Writer owns no global state; it is a short-lived object per frame.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};
use std::io::Write;

use crate::CellFlags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Style(CellFlags),
    Print(String),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn style(&mut self, flags: CellFlags) {
        self.cmds.push(Command::Style(flags));
    }
    /// Appends to the previous `Print` when possible to keep the command list short.
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if s.is_empty() {
            return;
        }
        if let Some(Command::Print(prev)) = self.cmds.last_mut() {
            prev.push_str(&s);
        } else {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Style(flags) => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if flags.intersects(CellFlags::SELECTION | CellFlags::CURSOR) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if flags.contains(CellFlags::HIGHLIGHT) {
                        queue!(out, SetAttribute(Attribute::Underlined))?;
                    }
                    if flags.contains(CellFlags::GUTTER) {
                        queue!(out, SetAttribute(Attribute::Dim))?;
                    }
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
