//! Core calculator operations
//!
//! Error prevention: the operator set is closed, so every binary operation is
//! one of four variants and `compute` is total over them.

use serde::{Deserialize, Serialize};

use crate::config::SymbolStyle;
use crate::core::{CalcError, CalcResult};

/// Number of decimal places every stored or displayed result is rounded to
pub const DECIMAL_PLACES: usize = 12;

/// Binary operator committed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self, style: SymbolStyle) -> &'static str {
        match (self, style) {
            (Self::Add, _) => "+",
            (Self::Subtract, SymbolStyle::Unicode) => "−",
            (Self::Subtract, SymbolStyle::Ascii) => "-",
            (Self::Multiply, SymbolStyle::Unicode) => "×",
            (Self::Multiply, SymbolStyle::Ascii) => "*",
            (Self::Divide, SymbolStyle::Unicode) => "÷",
            (Self::Divide, SymbolStyle::Ascii) => "/",
        }
    }

    /// Parses an operator from either the ASCII or the Unicode alphabet
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the raw arithmetic, without domain checks or rounding
    #[must_use]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }

    /// Returns true for the operators where percent means "percent of base"
    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

/// Computes `left op right`, rounded and normalized
///
/// Division by zero is the only domain error over finite operands.
pub fn compute(left: f64, op: Operator, right: f64) -> CalcResult<f64> {
    if !left.is_finite() || !right.is_finite() {
        return Err(CalcError::NonFiniteOperand);
    }
    if op == Operator::Divide && right == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    let result = normalize(op.apply(left, right));
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::Overflow)
    }
}

/// Rounds to twelve decimal places and collapses negative zero
///
/// Rounding goes through the exact decimal expansion, which absorbs binary
/// representation error such as `0.1 + 0.2`.
#[must_use]
pub fn normalize(n: f64) -> f64 {
    if !n.is_finite() {
        return n;
    }

    let places = DECIMAL_PLACES;
    let rounded = format!("{n:.places$}").parse::<f64>().unwrap_or(n);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
