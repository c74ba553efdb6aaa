//! The calculator engine
//!
//! Error prevention: the state is an enum of phases, so combinations such as
//! "operator pending without an accumulator" cannot be represented.
//!
//! Every action runs to completion and leaves the engine in a valid phase.
//! Parse and arithmetic failures move the engine to [`Phase::Error`], which
//! only [`Engine::clear`] leaves.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::CalcConfig;
use crate::core::action::{map_key, Action, Key};
use crate::core::buffer::{self, IDLE};
use crate::core::format::format_number;
use crate::core::operations::{compute, normalize, Operator};
use crate::core::{CalcError, CalcResult};

/// Where the engine is in the "left operator right" cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No operator committed; the buffer is the only value
    Entry {
        /// `=` was pressed on the bare value
        evaluated: bool,
    },
    /// An operator is committed and waits for its right operand
    Pending {
        /// Left operand
        accumulator: f64,
        /// Committed operator
        operator: Operator,
        /// Right operand of the previous evaluation, reused by a bare `=`
        last_operand: Option<f64>,
        /// The buffer has been edited since the operator was committed
        operand_typed: bool,
    },
    /// An evaluation just completed; `=` repeats it
    Evaluated {
        /// The result, shown in the buffer
        accumulator: f64,
        /// Operator that produced the result
        operator: Operator,
        /// Right operand that produced the result
        last_operand: f64,
    },
    /// Terminal error display; only clear leaves it
    Error(CalcError),
}

impl Default for Phase {
    fn default() -> Self {
        Self::Entry { evaluated: false }
    }
}

/// Flat view of the engine state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineState {
    /// Left operand of a pending or completed operation
    pub accumulator: Option<f64>,
    /// Operator waiting for its right operand
    pub pending_operator: Option<Operator>,
    /// Text of the number being typed, or the error marker
    pub input_buffer: String,
    /// Right operand of the last completed operation
    pub last_operand: Option<f64>,
    /// An evaluation just completed
    pub just_evaluated: bool,
    /// The engine is in the error display
    pub errored: bool,
}

/// The two display lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Display {
    /// Main line: the buffer, or the error marker
    pub primary: String,
    /// Expression line: `accumulator operator operand`, or the error message
    pub secondary: String,
}

/// Calculator engine driven by discrete actions
#[derive(Debug, Clone)]
pub struct Engine {
    config: CalcConfig,
    phase: Phase,
    buffer: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine in the cleared state with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    /// Creates an engine in the cleared state
    #[must_use]
    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            config,
            phase: Phase::default(),
            buffer: IDLE.to_string(),
        }
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Returns the current phase
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the raw buffer text
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns true while the error display is shown
    #[must_use]
    pub fn is_errored(&self) -> bool {
        matches!(self.phase, Phase::Error(_))
    }

    /// Returns the error that put the engine in the error display
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        match &self.phase {
            Phase::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Parses the buffer
    pub fn parse_buffer(&self) -> CalcResult<f64> {
        if self.is_errored() {
            return Err(CalcError::Parse(self.buffer.clone()));
        }
        buffer::parse_buffer(&self.buffer)
    }

    /// Returns the flat state record
    #[must_use]
    pub fn snapshot(&self) -> EngineState {
        let mut state = EngineState {
            accumulator: None,
            pending_operator: None,
            input_buffer: self.buffer.clone(),
            last_operand: None,
            just_evaluated: false,
            errored: false,
        };
        match &self.phase {
            Phase::Entry { evaluated } => state.just_evaluated = *evaluated,
            Phase::Pending {
                accumulator,
                operator,
                last_operand,
                ..
            } => {
                state.accumulator = Some(*accumulator);
                state.pending_operator = Some(*operator);
                state.last_operand = *last_operand;
            }
            Phase::Evaluated {
                accumulator,
                last_operand,
                ..
            } => {
                state.accumulator = Some(*accumulator);
                state.last_operand = Some(*last_operand);
                state.just_evaluated = true;
            }
            Phase::Error(_) => state.errored = true,
        }
        state
    }

    /// Composes the two display lines
    #[must_use]
    pub fn display(&self) -> Display {
        let marker = &self.config.error_marker;
        let (accumulator, operator, operand) = match &self.phase {
            Phase::Error(_) => {
                return Display {
                    primary: marker.clone(),
                    secondary: self.config.error_message.clone(),
                };
            }
            Phase::Entry { .. } => (None, None, None),
            Phase::Pending {
                accumulator,
                operator,
                operand_typed,
                ..
            } => (
                Some(*accumulator),
                Some(*operator),
                operand_typed.then_some(self.buffer.as_str()),
            ),
            Phase::Evaluated { accumulator, .. } => (Some(*accumulator), None, None),
        };

        let mut parts = Vec::with_capacity(3);
        if let Some(acc) = accumulator {
            parts.push(format_number(acc, marker));
        }
        if let Some(op) = operator {
            parts.push(op.symbol(self.config.symbols).to_string());
        }
        if let Some(text) = operand {
            parts.push(text.to_string());
        }

        Display {
            primary: self.buffer.clone(),
            secondary: parts.join(" "),
        }
    }

    /// Applies an action; everything but clear is ignored while errored
    pub fn dispatch(&mut self, action: Action) {
        if self.is_errored() && !action.is_clear() {
            trace!(?action, "ignored while errored");
            return;
        }
        match action {
            Action::Digit(d) => self.append_digit(d),
            Action::Dot => self.append_dot(),
            Action::Delete => self.delete_last(),
            Action::Clear => self.clear(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percent => self.apply_percent(),
            Action::Operator(op) => self.commit_operator(op),
            Action::Evaluate => self.evaluate(),
        }
    }

    /// Maps a key press and applies it
    ///
    /// Returns true if the key was accepted.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let Some(action) = map_key(key, &self.config) else {
            return false;
        };
        if self.is_errored() && !action.is_clear() {
            return false;
        }
        self.dispatch(action);
        true
    }

    /// Returns to the cleared state
    pub fn clear(&mut self) {
        self.phase = Phase::default();
        buffer::reset(&mut self.buffer);
        trace!("cleared");
    }

    /// Types a digit
    pub fn append_digit(&mut self, digit: u8) {
        if self.is_errored() {
            return;
        }
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            trace!(digit, "not a decimal digit");
            return;
        };
        self.start_fresh_after_evaluation();
        buffer::push_digit(&mut self.buffer, c);
        self.mark_operand_typed();
        trace!(buffer = %self.buffer, "digit");
    }

    /// Types the decimal point
    pub fn append_dot(&mut self) {
        if self.is_errored() {
            return;
        }
        self.start_fresh_after_evaluation();
        buffer::push_dot(&mut self.buffer);
        self.mark_operand_typed();
        trace!(buffer = %self.buffer, "dot");
    }

    /// Removes the last typed character; a displayed result is kept
    ///
    /// Deleting a right operand back to `"0"` un-types it, so `=` reuses
    /// the accumulator again.
    pub fn delete_last(&mut self) {
        match self.phase {
            Phase::Error(_) | Phase::Evaluated { .. } | Phase::Entry { evaluated: true } => {}
            Phase::Entry { evaluated: false } => {
                buffer::pop_last(&mut self.buffer);
                trace!(buffer = %self.buffer, "delete");
            }
            Phase::Pending {
                ref mut operand_typed,
                ..
            } => {
                buffer::pop_last(&mut self.buffer);
                if self.buffer == IDLE {
                    *operand_typed = false;
                }
                trace!(buffer = %self.buffer, "delete");
            }
        }
    }

    /// Flips the sign of the buffer
    ///
    /// Applied to a displayed result, the negated result becomes a plain
    /// value and the repeat operation is dropped.
    pub fn toggle_sign(&mut self) {
        if self.is_errored() {
            return;
        }
        buffer::toggle_sign(&mut self.buffer);
        match self.phase {
            Phase::Evaluated { .. } => self.phase = Phase::Entry { evaluated: true },
            _ => self.mark_operand_typed(),
        }
        trace!(buffer = %self.buffer, "toggle sign");
    }

    /// Applies percent semantics to the buffer
    ///
    /// With `+` or `−` pending the buffer becomes that percentage of the
    /// accumulator; with `×` or `÷` it becomes the bare fraction. Without a
    /// pending operator the buffer is simply divided by 100.
    pub fn apply_percent(&mut self) {
        if self.is_errored() {
            return;
        }
        let percent = match self.parse_buffer() {
            Ok(p) => p / 100.0,
            Err(err) => return self.fail(err),
        };

        match self.phase {
            Phase::Pending {
                accumulator,
                operator,
                ref mut operand_typed,
                ..
            } => {
                let operand = if operator.is_additive() {
                    accumulator * percent
                } else {
                    percent
                };
                *operand_typed = true;
                self.set_buffer_number(normalize(operand));
            }
            _ => {
                self.phase = Phase::Entry { evaluated: false };
                self.set_buffer_number(normalize(percent));
            }
        }
        trace!(buffer = %self.buffer, "percent");
    }

    /// Commits a binary operator, resolving a pending operation first
    pub fn commit_operator(&mut self, next: Operator) {
        if self.is_errored() {
            return;
        }
        let current = match self.parse_buffer() {
            Ok(n) => n,
            Err(err) => return self.fail(err),
        };

        let phase = std::mem::take(&mut self.phase);
        self.phase = match phase {
            Phase::Entry { .. } => Phase::Pending {
                accumulator: current,
                operator: next,
                last_operand: None,
                operand_typed: false,
            },
            Phase::Evaluated {
                accumulator,
                last_operand,
                ..
            } => Phase::Pending {
                accumulator,
                operator: next,
                last_operand: Some(last_operand),
                operand_typed: false,
            },
            Phase::Pending {
                accumulator,
                last_operand,
                operand_typed: false,
                ..
            } => {
                debug!(operator = ?next, "operator replaced");
                self.phase = Phase::Pending {
                    accumulator,
                    operator: next,
                    last_operand,
                    operand_typed: false,
                };
                return;
            }
            Phase::Pending {
                accumulator,
                operator,
                operand_typed: true,
                ..
            } => match compute(accumulator, operator, current) {
                Ok(result) => {
                    debug!(accumulator, ?operator, operand = current, result, "chained");
                    Phase::Pending {
                        accumulator: result,
                        operator: next,
                        last_operand: None,
                        operand_typed: false,
                    }
                }
                Err(err) => return self.fail(err),
            },
            Phase::Error(err) => Phase::Error(err),
        };
        buffer::reset(&mut self.buffer);
        debug!(operator = ?next, "operator committed");
    }

    /// Computes the pending operation, or repeats the last one
    pub fn evaluate(&mut self) {
        let (accumulator, operator, operand) = match self.phase.clone() {
            Phase::Error(_) => return,
            Phase::Entry { .. } => {
                self.phase = Phase::Entry { evaluated: true };
                return;
            }
            Phase::Pending {
                accumulator,
                operator,
                last_operand,
                operand_typed,
            } => {
                let operand = if operand_typed {
                    match self.parse_buffer() {
                        Ok(n) => n,
                        Err(err) => return self.fail(err),
                    }
                } else {
                    last_operand.unwrap_or(accumulator)
                };
                (accumulator, operator, operand)
            }
            Phase::Evaluated {
                accumulator,
                operator,
                last_operand,
            } => (accumulator, operator, last_operand),
        };

        match compute(accumulator, operator, operand) {
            Ok(result) => {
                debug!(accumulator, ?operator, operand, result, "evaluated");
                self.phase = Phase::Evaluated {
                    accumulator: result,
                    operator,
                    last_operand: operand,
                };
                self.set_buffer_number(result);
            }
            Err(err) => self.fail(err),
        }
    }

    /// Enters the error display
    fn fail(&mut self, err: CalcError) {
        warn!(error = %err, buffer = %self.buffer, "calculator error");
        self.buffer.clone_from(&self.config.error_marker);
        self.phase = Phase::Error(err);
    }

    /// Writes a computed number into the buffer, failing on non-finite values
    fn set_buffer_number(&mut self, n: f64) {
        if n.is_finite() {
            self.buffer = format_number(n, &self.config.error_marker);
        } else {
            self.fail(CalcError::Overflow);
        }
    }

    fn start_fresh_after_evaluation(&mut self) {
        if matches!(
            self.phase,
            Phase::Evaluated { .. } | Phase::Entry { evaluated: true }
        ) {
            self.phase = Phase::Entry { evaluated: false };
            buffer::reset(&mut self.buffer);
        }
    }

    fn mark_operand_typed(&mut self) {
        if let Phase::Pending { operand_typed, .. } = &mut self.phase {
            *operand_typed = true;
        }
    }
}
