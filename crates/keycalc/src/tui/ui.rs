//! TUI rendering
//!
//! Visual feedback: the expression line, the main number and the engine
//! status are always on screen.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::{format_number, Phase};

/// Screen regions of the calculator UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Secondary (expression) line
    pub expression: Rect,
    /// Primary display
    pub primary: Rect,
    /// Engine status panel
    pub status: Rect,
    /// Clickable keypad
    pub keypad: Rect,
    /// Help sidebar
    pub help: Rect,
}

/// Keypad size: five rows of two cells and four columns of six, plus border
const KEYPAD_WIDTH: u16 = 26;
const KEYPAD_HEIGHT: u16 = 12;

/// Computes the screen regions for a terminal area
///
/// The two display lines span the full width; status, keypad and help sit
/// side by side below them.
#[must_use]
pub fn layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(KEYPAD_HEIGHT),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(KEYPAD_WIDTH),
            Constraint::Length(24),
        ])
        .split(rows[2]);

    let keypad = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(KEYPAD_HEIGHT), Constraint::Min(0)])
        .split(body[1]);

    AppLayout {
        expression: rows[0],
        primary: rows[1],
        status: body[0],
        keypad: keypad[0],
        help: body[2],
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_expression(&self, area: Rect, buf: &mut Buffer) {
        let display = self.app.display();
        Paragraph::new(Span::styled(
            display.secondary,
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Expression ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
    }

    fn render_primary(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.engine().is_errored() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(self.app.display().primary, style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let symbols = engine.config().symbols;
        let marker = &engine.config().error_marker;
        let (text, style) = match engine.phase() {
            Phase::Entry { evaluated: false } => {
                ("Ready".to_string(), Style::default().fg(Color::Gray))
            }
            Phase::Entry { evaluated: true } => {
                ("= done".to_string(), Style::default().fg(Color::Green))
            }
            Phase::Pending { operator, .. } => (
                format!("Pending {}", operator.symbol(symbols)),
                Style::default().fg(Color::Yellow),
            ),
            Phase::Evaluated {
                operator,
                last_operand,
                ..
            } => (
                format!(
                    "= repeats {} {}",
                    operator.symbol(symbols),
                    format_number(*last_operand, marker)
                ),
                Style::default().fg(Color::Green),
            ),
            Phase::Error(err) => (format!("✗ {err}"), Style::default().fg(Color::Red)),
        };

        List::new([ListItem::new(Span::styled(text, style))])
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = layout(area);
        self.render_expression(regions.expression, buf);
        self.render_primary(regions.primary, buf);
        self.render_status(regions.status, buf);
        KeypadWidget::new(self.app.keypad()).render(regions.keypad, buf);
        self.render_help(regions.help, buf);
    }
}

/// Window title
pub const TITLE: &str = " Keycalc ";

/// Keyboard shortcuts shown in the help sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9", "Digits"),
    (". ,", "Decimal point"),
    ("+-*/", "Operators"),
    ("%", "Percent"),
    ("Enter =", "Evaluate"),
    ("Bksp", "Delete"),
    ("Esc", "Clear"),
    ("Click", "Keypad"),
    ("Ctrl+C", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).unwrap()
    }

    fn draw(app: &CalculatorApp) -> Terminal<TestBackend> {
        let mut terminal = create_test_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
    }

    fn content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    /// Text of one screen row inside a region
    fn row_text(terminal: &Terminal<TestBackend>, region: Rect, row: u16) -> String {
        let buf = terminal.backend().buffer();
        (region.x..region.x + region.width)
            .map(|x| buf[(x, row)].symbol())
            .collect::<String>()
    }

    fn typed(script: &str) -> CalculatorApp {
        let mut app = CalculatorApp::new();
        for c in script.chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app
    }

    const SCREEN: Rect = Rect::new(0, 0, 80, 24);

    // ===== Layout tests =====

    #[test]
    fn test_layout_regions_fit() {
        let regions = layout(SCREEN);
        assert_eq!(regions.keypad.width, KEYPAD_WIDTH);
        assert_eq!(regions.keypad.height, KEYPAD_HEIGHT);
        assert_eq!(regions.expression.height, 3);
        assert_eq!(regions.primary.height, 3);
        assert!(regions.expression.x >= 1 && regions.expression.y >= 1);
        assert!(regions.help.x + regions.help.width <= 79);
    }

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let regions = layout(SCREEN);
        assert!(regions.primary.y + regions.primary.height <= regions.keypad.y);
        assert!(regions.status.x + regions.status.width <= regions.keypad.x);
        assert!(regions.keypad.x + regions.keypad.width <= regions.help.x);
    }

    #[test]
    fn test_layout_display_spans_width() {
        let regions = layout(SCREEN);
        assert_eq!(regions.expression.width, 78);
        assert_eq!(regions.primary.width, 78);
    }

    // ===== Render tests =====

    #[test]
    fn test_render_initial() {
        let terminal = draw(&CalculatorApp::new());
        let text = content(&terminal);
        assert!(text.contains("Keycalc"));
        assert!(text.contains("Ready"));
        assert!(text.contains("[AC]"));
        assert!(text.contains("Ctrl+C"));
    }

    #[test]
    fn test_render_primary_right_aligned() {
        let app = typed("123");
        let terminal = draw(&app);
        let region = layout(SCREEN).primary;
        let row = row_text(&terminal, region, region.y + 1);
        assert!(row.trim_end_matches('│').trim_end().ends_with("123"), "{row:?}");
    }

    #[test]
    fn test_render_expression_line() {
        let app = typed("12+7");
        let terminal = draw(&app);
        let region = layout(SCREEN).expression;
        let row = row_text(&terminal, region, region.y + 1);
        assert!(row.contains("12 + 7"), "{row:?}");
        assert!(content(&terminal).contains("Pending +"));
    }

    #[test]
    fn test_render_result_and_repeat_status() {
        let app = typed("5+3=");
        let terminal = draw(&app);
        let text = content(&terminal);
        assert!(text.contains("= repeats + 3"));
        let region = layout(SCREEN).primary;
        assert!(row_text(&terminal, region, region.y + 1).contains('8'));
    }

    #[test]
    fn test_render_error_in_red() {
        let app = typed("1/0=");
        let terminal = draw(&app);
        let text = content(&terminal);
        assert!(text.contains("Division by zero or invalid operation"));
        assert!(text.contains("✗ Division by zero"));

        let region = layout(SCREEN).primary;
        let buf = terminal.backend().buffer();
        let red: String = (region.x..region.x + region.width)
            .map(|x| &buf[(x, region.y + 1)])
            .filter(|cell| cell.fg == Color::Red)
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(red, "Error");
    }

    #[test]
    fn test_render_pressed_button() {
        let mut app = CalculatorApp::new();
        app.press(Action::Percent);
        let terminal = draw(&app);
        let highlighted: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .map(|c| c.symbol())
            .collect();
        assert_eq!(highlighted, "[%]");
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let app = typed("42");
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
