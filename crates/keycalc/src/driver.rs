//! Unified calculator driver
//!
//! Scenarios are written once against [`CalculatorDriver`] and run against
//! every host: the bare engine and the terminal frontend.

use crate::config::CalcConfig;
use crate::core::{parse_script, Action, Engine, Key};

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use keycalc::driver::{CalculatorDriver, EngineDriver};
///
/// fn verify_double<D: CalculatorDriver>(driver: &mut D) {
///     driver.press_all("21*2=").unwrap();
///     assert_eq!(driver.primary(), "42");
/// }
///
/// verify_double(&mut EngineDriver::new());
/// ```
pub trait CalculatorDriver {
    /// Delivers an action
    fn press(&mut self, action: Action);

    /// Delivers a key press; returns true if the key was accepted
    fn key(&mut self, key: Key) -> bool;

    /// Gets the primary display line
    fn primary(&self) -> String;

    /// Gets the secondary display line
    fn secondary(&self) -> String;

    /// Gets the active configuration
    fn config(&self) -> &CalcConfig;

    /// Clears the calculator state
    fn clear(&mut self) {
        self.press(Action::Clear);
    }

    /// Delivers a scripted key sequence
    ///
    /// Returns the first character that does not stand for any key.
    fn press_all(&mut self, script: &str) -> Result<(), char> {
        let actions = parse_script(script, self.config())?;
        for action in actions {
            self.press(action);
        }
        Ok(())
    }
}

/// Driver over the bare engine
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: Engine,
}

impl EngineDriver {
    /// Creates a driver with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver with a configuration
    #[must_use]
    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            engine: Engine::with_config(config),
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, action: Action) {
        self.engine.dispatch(action);
    }

    fn key(&mut self, key: Key) -> bool {
        self.engine.handle_key(key)
    }

    fn primary(&self) -> String {
        self.engine.display().primary
    }

    fn secondary(&self) -> String {
        self.engine.display().secondary
    }

    fn config(&self) -> &CalcConfig {
        self.engine.config()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Action, CalcConfig, CalculatorDriver, Key};
    use crate::tui::CalculatorApp;

    /// Driver that routes input through the terminal app
    ///
    /// Keys travel the same path as real terminal events: crossterm event,
    /// input handler, engine.
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    fn to_event(key: Key) -> KeyEvent {
        let code = match key {
            Key::Char(c) => KeyCode::Char(c),
            Key::Backspace => KeyCode::Backspace,
            Key::Escape => KeyCode::Esc,
            Key::Enter => KeyCode::Enter,
            Key::Other => KeyCode::Tab,
        };
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: Action) {
            self.app.press(action);
        }

        fn key(&mut self, key: Key) -> bool {
            self.app.handle_key_event(to_event(key))
        }

        fn primary(&self) -> String {
            self.app.display().primary
        }

        fn secondary(&self) -> String {
            self.app.display().secondary
        }

        fn config(&self) -> &CalcConfig {
            self.app.engine().config()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified Test Specifications =====
// These scenarios work with ANY CalculatorDriver implementation

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (script, expected) in [("2+3=", "5"), ("10-4=", "6"), ("6*7=", "42"), ("20/4=", "5")] {
        driver.clear();
        driver.press_all(script).unwrap();
        assert_eq!(driver.primary(), expected, "{script}");
    }
    driver.clear();
}

/// Verifies left-to-right chaining without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("2+3*4=").unwrap();
    assert_eq!(driver.primary(), "20");
    driver.clear();
}

/// Verifies that `=` repeats the last operation
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("5+3=").unwrap();
    assert_eq!(driver.primary(), "8");
    driver.press(Action::Evaluate);
    assert_eq!(driver.primary(), "11");
    driver.press(Action::Evaluate);
    assert_eq!(driver.primary(), "14");
    driver.clear();
}

/// Verifies the error display and that only clear leaves it
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("5/0=").unwrap();
    assert_eq!(driver.primary(), driver.config().error_marker);
    assert_eq!(driver.secondary(), driver.config().error_message);

    driver.press(Action::Digit(1));
    assert_eq!(driver.primary(), driver.config().error_marker);

    driver.clear();
    assert_eq!(driver.primary(), "0");
    assert_eq!(driver.secondary(), "");
}

/// Verifies percent relative to the accumulator
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("50+10%").unwrap();
    assert_eq!(driver.primary(), "5");
    driver.press(Action::Evaluate);
    assert_eq!(driver.primary(), "55");

    driver.clear();
    driver.press_all("50*10%").unwrap();
    assert_eq!(driver.primary(), "0.1");
    driver.press(Action::Evaluate);
    assert_eq!(driver.primary(), "5");
    driver.clear();
}

/// Verifies twelve-decimal rounding of results
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("0.1+0.2=").unwrap();
    assert_eq!(driver.primary(), "0.3");
    driver.clear();
}

/// Verifies that a second operator replaces the first
pub fn verify_operator_replacement<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("5+*=").unwrap();
    assert_eq!(driver.primary(), "25");
    driver.clear();
}

/// Verifies the sign toggle round trip
pub fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("12.5").unwrap();
    driver.press(Action::ToggleSign);
    assert_eq!(driver.primary(), "-12.5");
    driver.press(Action::ToggleSign);
    assert_eq!(driver.primary(), "12.5");
    driver.clear();
}

/// Verifies the secondary expression line
pub fn verify_secondary_display<D: CalculatorDriver>(driver: &mut D) {
    let symbols = driver.config().symbols;
    let times = crate::core::Operator::Multiply.symbol(symbols);

    driver.clear();
    driver.press_all("7*").unwrap();
    assert_eq!(driver.secondary(), format!("7 {times}"));
    driver.press(Action::Digit(2));
    assert_eq!(driver.secondary(), format!("7 {times} 2"));
    driver.press(Action::Evaluate);
    assert_eq!(driver.secondary(), "14");
    driver.clear();
}

/// Verifies physical key input
pub fn verify_keyboard<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    for key in [Key::Char('1'), Key::Char(','), Key::Char('5'), Key::Char('*')] {
        assert!(driver.key(key), "{key:?} should be accepted");
    }
    assert!(!driver.key(Key::Char('x')));
    assert!(!driver.key(Key::Other));
    assert!(driver.key(Key::Char('4')));
    assert!(driver.key(Key::Backspace));
    assert!(driver.key(Key::Char('2')));
    assert!(driver.key(Key::Enter));
    assert_eq!(driver.primary(), "3");

    assert!(driver.key(Key::Escape));
    assert_eq!(driver.primary(), "0");
}

/// Verifies that clearing twice is the same as clearing once
pub fn verify_clear_idempotent<D: CalculatorDriver>(driver: &mut D) {
    driver.press_all("12+3").unwrap();
    driver.clear();
    let once = (driver.primary(), driver.secondary());
    driver.clear();
    assert_eq!((driver.primary(), driver.secondary()), once);
    assert_eq!(once, ("0".to_string(), String::new()));
}

/// Complete verification suite - runs all scenarios
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_repeated_equals(driver);
    verify_division_by_zero(driver);
    verify_percent(driver);
    verify_rounding(driver);
    verify_operator_replacement(driver);
    verify_sign_toggle(driver);
    verify_secondary_display(driver);
    verify_keyboard(driver);
    verify_clear_idempotent(driver);
}
