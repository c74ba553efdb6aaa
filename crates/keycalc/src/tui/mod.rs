//! TUI frontend for the calculator
//!
//! Visual feedback: a terminal display with a clickable keypad

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{layout, render, AppLayout, CalculatorUI};
