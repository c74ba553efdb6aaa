//! Clickable keypad for the terminal calculator
//!
//! Visual feedback: the button matching the last accepted input is
//! highlighted.
//!
//! Buttons carry the engine [`Action`] they stand for, so a click and a key
//! press reach the engine the same way.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::config::SymbolStyle;
use crate::core::{Action, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button
    pub label: &'static str,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// The action this button performs
    pub action: Action,
}

impl KeypadButton {
    /// Creates a button
    #[must_use]
    pub const fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            pressed: false,
            action,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        let d = d.min(9);
        Self::new(DIGITS[usize::from(d)], Action::Digit(d))
    }

    /// Creates an operator button
    #[must_use]
    pub const fn operator(op: Operator, symbols: SymbolStyle) -> Self {
        Self::new(op.symbol(symbols), Action::Operator(op))
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout - a 5x4 grid of buttons
/// ```text
/// [AC] [±] [%] [÷]
/// [7]  [8] [9] [×]
/// [4]  [5] [6] [−]
/// [1]  [2] [3] [+]
/// [0]  [.] [⌫] [=]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad with Unicode operator labels
    #[must_use]
    pub fn new() -> Self {
        Self::with_symbols(SymbolStyle::Unicode)
    }

    /// Creates the standard keypad with the given operator labels
    #[must_use]
    pub fn with_symbols(symbols: SymbolStyle) -> Self {
        let op = |o| KeypadButton::operator(o, symbols);
        let buttons = vec![
            KeypadButton::new("AC", Action::Clear),
            KeypadButton::new("±", Action::ToggleSign),
            KeypadButton::new("%", Action::Percent),
            op(Operator::Divide),
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            op(Operator::Multiply),
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            op(Operator::Subtract),
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            op(Operator::Add),
            KeypadButton::digit(0),
            KeypadButton::new(".", Action::Dot),
            KeypadButton::new("⌫", Action::Delete),
            KeypadButton::new("=", Action::Evaluate),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button that performs an action
    #[must_use]
    pub fn find_button(&self, action: Action) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights only the button performing an action
    pub fn highlight(&mut self, action: Action) {
        self.release_all();
        if let Some(btn) = self
            .find_button(action)
            .and_then(|idx| self.buttons.get_mut(idx))
        {
            btn.set_pressed(true);
        }
    }

    /// Returns the highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons
            .iter()
            .enumerate()
            .map(move |(i, btn)| ((i / self.cols, i % self.cols), btn))
    }

    /// Converts a click position to button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

fn button_style(btn: &KeypadButton) -> Style {
    if btn.pressed {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    match btn.action {
        Action::Digit(_) | Action::Dot => Style::default().fg(Color::White),
        Action::Operator(_) => Style::default().fg(Color::Yellow),
        Action::Evaluate => Style::default().fg(Color::Green),
        Action::Clear | Action::Delete => Style::default().fg(Color::Red),
        Action::ToggleSign | Action::Percent => Style::default().fg(Color::Cyan),
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let label = format!("[{}]", btn.label);
            let label_width = label.chars().count() as u16;
            if btn_width < label_width {
                continue;
            }
            let label_x = x + (btn_width - label_width) / 2;
            let label_y = y + btn_height / 2;

            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(
                    label_x,
                    label_y,
                    &Span::styled(label, button_style(btn)),
                    btn_width,
                );
            }
        }
    }
}
