//! Keyboard input handling
//!
//! Error prevention: terminal events are reduced to the platform-neutral
//! [`Key`] before the engine sees them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Key;

/// What a terminal key event means to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a key to the engine
    Calc(Key),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    ///
    /// Ctrl+C and Ctrl+Q quit; other control chords and key releases are
    /// ignored.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return match code {
                KeyCode::Char('c' | 'q') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::Quit
                }
                _ => KeyAction::None,
            };
        }

        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            KeyCode::Enter => Key::Enter,
            _ => Key::Other,
        };
        KeyAction::Calc(key)
    }
}
