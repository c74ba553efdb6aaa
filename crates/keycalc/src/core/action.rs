//! User actions and the host key mapping
//!
//! Hosts translate their native events into [`Key`] and let [`map_key`]
//! decide which [`Action`], if any, the key stands for.

use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::core::Operator;

/// A discrete user action delivered to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Type a digit (0-9)
    Digit(u8),
    /// Type the decimal point
    Dot,
    /// Remove the last typed character
    Delete,
    /// Reset to the cleared state
    Clear,
    /// Flip the sign of the buffer
    ToggleSign,
    /// Apply percent semantics to the buffer
    Percent,
    /// Commit a binary operator
    Operator(Operator),
    /// Compute the pending operation
    Evaluate,
}

impl Action {
    /// Returns the digit action for a character, if it is an ASCII digit
    #[must_use]
    pub fn digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self::Digit(d as u8))
    }

    /// Returns true for the only action honored while errored
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Platform-neutral physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Backspace
    Backspace,
    /// Escape
    Escape,
    /// Enter / Return
    Enter,
    /// Any other key
    Other,
}

/// Maps a key to the action it stands for
///
/// Digits, `.` (and `,` when configured), Backspace, Escape, Enter or `=`,
/// `%` and the four operator characters are recognized; every other key
/// maps to `None`.
#[must_use]
pub fn map_key(key: Key, config: &CalcConfig) -> Option<Action> {
    match key {
        Key::Backspace => Some(Action::Delete),
        Key::Escape => Some(Action::Clear),
        Key::Enter => Some(Action::Evaluate),
        Key::Other => None,
        Key::Char(c) => match c {
            '0'..='9' => Action::digit(c),
            '.' => Some(Action::Dot),
            ',' if config.comma_decimal => Some(Action::Dot),
            '=' => Some(Action::Evaluate),
            '%' => Some(Action::Percent),
            '+' => Some(Action::Operator(Operator::Add)),
            '-' => Some(Action::Operator(Operator::Subtract)),
            '*' => Some(Action::Operator(Operator::Multiply)),
            '/' => Some(Action::Operator(Operator::Divide)),
            _ => None,
        },
    }
}

/// Parses a scripted key sequence into actions
///
/// Each character is mapped like a key press, with a few spellings for keys
/// that have no printable form: `<` is Backspace, `c`/`C` is Escape, `~`
/// toggles the sign, and `−`, `×`, `÷` are accepted as operators.
/// Whitespace is skipped. Returns the first character that maps to nothing.
pub fn parse_script(script: &str, config: &CalcConfig) -> Result<Vec<Action>, char> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            let key = match c {
                '<' => Key::Backspace,
                'c' | 'C' => Key::Escape,
                '~' => return Ok(Action::ToggleSign),
                _ => Key::Char(c),
            };
            map_key(key, config)
                .or_else(|| Operator::from_char(c).map(Action::Operator))
                .ok_or(c)
        })
        .collect()
}
