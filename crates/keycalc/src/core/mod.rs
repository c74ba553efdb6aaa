//! Core calculator module
//!
//! The engine is a pure state machine: every failure is a value, never a panic.

pub mod action;
pub mod buffer;
pub mod engine;
pub mod format;
mod operations;

pub use action::{map_key, parse_script, Action, Key};
pub use engine::{Display, Engine, EngineState, Phase};
pub use format::format_number;
pub use operations::{compute, normalize, Operator};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The input buffer does not hold a finite numeral
    #[error("Invalid number: {0}")]
    Parse(String),
    /// Right operand is zero under division
    #[error("Division by zero")]
    DivisionByZero,
    /// An operand going into a computation is infinite or NaN
    #[error("Non-finite operand")]
    NonFiniteOperand,
    /// The arithmetic result left the finite range
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
}
