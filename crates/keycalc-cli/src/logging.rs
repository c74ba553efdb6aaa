//! Tracing subscriber setup
//!
//! `KEYCALC_LOG` overrides the level derived from `-v`/`-q` with any
//! `EnvFilter` directive. Line-oriented commands log to stderr. The terminal
//! UI owns the screen, so it only logs when `KEYCALC_LOG_FILE` names a file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Verbosity;
use crate::error::CliResult;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "KEYCALC_LOG";

/// Environment variable naming the log file for the terminal UI
pub const LOG_FILE_ENV: &str = "KEYCALC_LOG_FILE";

/// Builds the filter: `KEYCALC_LOG` if set and valid, else the verbosity level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Installs a subscriber writing to stderr; targets are shown from `-v` up
pub fn init_stderr(verbosity: Verbosity) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_verbose())
        .with_level(true);

    // Only the first global subscriber wins
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(layer)
        .try_init();
}

/// Installs a subscriber writing to `path`
pub fn init_file(path: &Path, verbosity: Verbosity) -> CliResult<()> {
    let file = File::create(path)?;
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(layer)
        .try_init();
    Ok(())
}

/// Installs file logging for the terminal UI if `KEYCALC_LOG_FILE` is set
///
/// Returns true if logging was enabled.
pub fn init_for_tui(verbosity: Verbosity) -> CliResult<bool> {
    match std::env::var_os(LOG_FILE_ENV) {
        Some(path) if !path.is_empty() => {
            init_file(Path::new(&path), verbosity)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
