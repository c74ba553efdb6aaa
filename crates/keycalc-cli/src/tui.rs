//! Terminal host for the interactive calculator

use std::io::{self, Stdout};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::config::CalcConfig;
use keycalc::tui::{render, CalculatorApp};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

type HostTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Runs the calculator until the user quits
///
/// The terminal is restored even when the event loop fails.
pub fn run(config: CalcConfig) -> CliResult<()> {
    let mut terminal = setup().map_err(|e| CliError::terminal(format!("setup failed: {e}")))?;
    info!("terminal calculator started");

    let mut app = CalculatorApp::with_config(config);
    let result = event_loop(&mut terminal, &mut app);

    restore(&mut terminal).map_err(|e| CliError::terminal(format!("restore failed: {e}")))?;
    info!(buffer = app.engine().buffer(), "terminal calculator stopped");
    result
}

fn setup() -> io::Result<HostTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
    undo_on_error(terminal, || {
        // Best effort; the setup error is the one reported
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })
}

/// Runs `undo` if `result` is an error, then passes `result` through
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        debug!("terminal setup failed, restoring");
        undo();
    }
    result
}

fn restore(terminal: &mut HostTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    while !app.should_quit() {
        terminal.draw(|frame| render(app, frame))?;

        let event = event::read()?;
        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        if app.handle_event(&event, screen) {
            debug!(?event, "handled");
        }
    }
    Ok(())
}
