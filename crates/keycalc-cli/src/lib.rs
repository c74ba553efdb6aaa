//! Keycalc CLI library
//!
//! Command-line and terminal frontends for the [`keycalc`] engine: scripted
//! key sequences for `keycalc run`, the interactive keypad for `keycalc tui`,
//! and configuration display for `keycalc config`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;
pub mod tui;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, FormatArg, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Reporter};
pub use runner::{run_script, RunReport, RunSummary, Step};
