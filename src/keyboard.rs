//! Key-event classification: undo, redo, and arrow movement.
//!
//! All functions here are pure. Input that matches nothing classifies as
//! `false` / `None`, so an unknown key never produces a command.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use crate::command::Command;
use crate::input::KeyInput;

/// Code of the history key (`Z`), after boundary normalization.
const HISTORY_CODE: &str = "Z";

/// Direction of an arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Parse a key code into an arrow direction.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    /// Offset `(dx, dy)` for one press, with `y` growing downward.
    #[must_use]
    pub fn delta(self, step: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -step),
            Self::Down => (0.0, step),
            Self::Left => (-step, 0.0),
            Self::Right => (step, 0.0),
        }
    }
}

/// Ctrl+Z without shift.
#[must_use]
pub fn is_undo(e: &KeyInput) -> bool {
    e.ctrl && !e.shift && e.code == HISTORY_CODE
}

/// Ctrl+Shift+Z.
#[must_use]
pub fn is_redo(e: &KeyInput) -> bool {
    e.ctrl && e.shift && e.code == HISTORY_CODE
}

/// Any of the four arrow keys, regardless of modifiers.
#[must_use]
pub fn is_arrow(e: &KeyInput) -> bool {
    arrow(e).is_some()
}

/// The arrow direction of `e`, if it is an arrow key.
#[must_use]
pub fn arrow(e: &KeyInput) -> Option<Arrow> {
    Arrow::from_code(&e.code)
}

/// Map a key-down to at most one command.
///
/// Undo and redo are checked before arrows. The two sets of codes are
/// disjoint, so the order only matters for readability.
#[must_use]
pub fn classify(e: &KeyInput, move_step: f64) -> Option<Command> {
    if is_undo(e) {
        return Some(Command::Undo);
    }
    if is_redo(e) {
        return Some(Command::Redo);
    }
    arrow(e).map(|dir| {
        let (dx, dy) = dir.delta(move_step);
        Command::MoveBy { dx, dy }
    })
}
