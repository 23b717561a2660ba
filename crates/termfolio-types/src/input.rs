//! Platform-agnostic input event types.
//!
//! Every front end maps its native keyboard input to these enums. The
//! session engine never sees raw platform input.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TermfolioError;

/// An input event arriving from the single text-entry surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(Key),
    /// The text surface changed wholesale (paste, IME commit, programmatic set).
    TextChanged(String),
}

/// Keys the terminal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character typed into the input.
    Char(char),
    /// Delete the character left of the caret.
    Backspace,
    Enter,
    ArrowUp,
    ArrowDown,
    Tab,
    Escape,
}

impl FromStr for Key {
    type Err = TermfolioError;

    /// Parse a DOM-style key name (`"Enter"`, `"ArrowUp"`, `"Tab"`, ...).
    /// A single character parses as [`Key::Char`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "Enter" => Key::Enter,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(TermfolioError::UnknownKey(s.to_string())),
                }
            },
        };
        Ok(key)
    }
}
