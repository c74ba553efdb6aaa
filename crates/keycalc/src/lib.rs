//! Keycalc - immediate-execution calculator engine
//!
//! A pocket-calculator state machine: digits build a number, each operator
//! resolves the pending operation left to right, `=` repeats the last
//! operation, and `%` works relative to the accumulator.
//!
//! # Principles
//!
//! - **Error prevention**: the engine phase is an enum, so invalid state
//!   combinations cannot be constructed
//! - **Stop on defect**: division by zero and overflow halt into a visible
//!   error display that only clear leaves
//! - **One driver, many hosts**: the same scenarios run against the bare
//!   engine and the terminal frontend
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! for action in parse_script("5+3==", engine.config()).unwrap() {
//!     engine.dispatch(action);
//! }
//! assert_eq!(engine.display().primary, "11");
//!
//! engine.dispatch(Action::Clear);
//! for action in parse_script("50+10%", engine.config()).unwrap() {
//!     engine.dispatch(action);
//! }
//! assert_eq!(engine.display().secondary, "50 + 5");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, ConfigError, ConfigResult, SymbolStyle};
    pub use crate::core::{
        format_number, map_key, parse_script, Action, CalcError, CalcResult, Display, Engine,
        EngineState, Key, Operator, Phase,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
