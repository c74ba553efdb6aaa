//! TUI application state
//!
//! Wraps the engine with the keypad highlight and the quit flag. All
//! calculator input, from keys or clicks, goes through the engine.

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::trace;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui;
use crate::config::CalcConfig;
use crate::core::{map_key, Action, Display, Engine};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: Engine,
    keypad: Keypad,
    input: InputHandler,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    /// Creates a calculator app with a configuration
    #[must_use]
    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            keypad: Keypad::with_symbols(config.symbols),
            engine: Engine::with_config(config),
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the two display lines
    #[must_use]
    pub fn display(&self) -> Display {
        self.engine.display()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Delivers an action and highlights its button
    pub fn press(&mut self, action: Action) {
        self.engine.dispatch(action);
        self.keypad.highlight(action);
    }

    /// Handles a terminal key event
    ///
    /// Returns true if the event changed anything.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        match self.input.handle_key(event) {
            KeyAction::Quit => {
                self.quit();
                true
            }
            KeyAction::None => false,
            KeyAction::Calc(key) => {
                let Some(action) = map_key(key, self.engine.config()) else {
                    return false;
                };
                let accepted = self.engine.handle_key(key);
                if accepted {
                    self.keypad.highlight(action);
                }
                accepted
            }
        }
    }

    /// Handles a mouse event; a left click on a keypad button presses it
    ///
    /// `screen` is the full terminal area the UI was drawn into.
    pub fn handle_mouse_event(&mut self, event: MouseEvent, screen: Rect) -> bool {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let area = ui::layout(screen).keypad;
        let Some(action) = self
            .keypad
            .hit_test(area, event.column, event.row)
            .and_then(|idx| self.keypad.get_button(idx))
            .map(|btn| btn.action)
        else {
            return false;
        };
        trace!(?action, "keypad click");
        self.press(action);
        true
    }

    /// Handles any terminal event
    pub fn handle_event(&mut self, event: &Event, screen: Rect) -> bool {
        match event {
            Event::Key(key) => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse, screen),
            _ => false,
        }
    }
}
