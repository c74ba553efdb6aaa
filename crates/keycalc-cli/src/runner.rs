//! Scripted key sequences

use keycalc::config::CalcConfig;
use keycalc::core::{parse_script, Display, Engine, EngineState};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Display after a single key
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Script character
    pub key: char,
    /// Display after the key
    #[serde(flatten)]
    pub display: Display,
    /// Whether the calculator was errored after the key
    pub errored: bool,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Script as given
    pub keys: String,
    /// Per-key displays
    pub steps: Vec<Step>,
    /// Final display
    #[serde(flatten)]
    pub display: Display,
    /// Whether the final state is errored
    pub errored: bool,
    /// Final engine state
    pub state: EngineState,
}

/// Final display only
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    /// Primary display line
    pub primary: &'a str,
    /// Secondary display line
    pub secondary: &'a str,
    /// Whether the final state is errored
    pub errored: bool,
}

impl RunReport {
    /// Borrowed final display
    #[must_use]
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            primary: &self.display.primary,
            secondary: &self.display.secondary,
            errored: self.errored,
        }
    }
}

/// Feeds `keys` through a fresh engine
///
/// Fails before touching the engine if any character is not a key.
pub fn run_script(keys: &str, config: CalcConfig) -> CliResult<RunReport> {
    let actions = parse_script(keys, &config).map_err(|c| CliError::invalid_key(keys, c))?;
    let mut engine = Engine::with_config(config);
    info!(keys, actions = actions.len(), "running key script");

    let steps = keys
        .chars()
        .filter(|c| !c.is_whitespace())
        .zip(actions)
        .map(|(key, action)| {
            engine.dispatch(action);
            debug!(key = %key, ?action, buffer = engine.buffer(), "step");
            Step {
                key,
                display: engine.display(),
                errored: engine.is_errored(),
            }
        })
        .collect();

    Ok(RunReport {
        keys: keys.to_string(),
        steps,
        display: engine.display(),
        errored: engine.is_errored(),
        state: engine.snapshot(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use keycalc::config::SymbolStyle;

    fn run(keys: &str) -> RunReport {
        run_script(keys, CalcConfig::default()).unwrap()
    }

    #[test]
    fn test_run_basic() {
        let report = run("12+7=");
        assert_eq!(report.display.primary, "19");
        assert!(!report.errored);
        assert_eq!(report.steps.len(), 5);
    }

    #[test]
    fn test_run_repeated_equals() {
        assert_eq!(run("5+3==").display.primary, "11");
    }

    #[test]
    fn test_run_skips_whitespace() {
        let report = run("1 + 2 =");
        assert_eq!(report.display.primary, "3");
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.steps[1].key, '+');
    }

    #[test]
    fn test_run_error_is_sticky() {
        let report = run("5/0=7+");
        assert!(report.errored);
        assert_eq!(report.display.primary, "Error");
        assert!(report.state.errored);
        assert!(!report.steps[1].errored);
        assert!(report.steps[3].errored);
    }

    #[test]
    fn test_run_clear_recovers() {
        let report = run("5/0=c4");
        assert!(!report.errored);
        assert_eq!(report.display.primary, "4");
    }

    #[test]
    fn test_run_invalid_key() {
        let err = run_script("12+q", CalcConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidKeys {
                key: 'q',
                position: 3
            }
        ));
    }

    #[test]
    fn test_run_ascii_symbols() {
        let config = CalcConfig {
            symbols: SymbolStyle::Ascii,
            ..CalcConfig::default()
        };
        let report = run_script("6*", config).unwrap();
        assert_eq!(report.display.secondary, "6 *");
    }

    #[test]
    fn test_run_empty_script() {
        let report = run("");
        assert_eq!(report.display.primary, "0");
        assert!(report.steps.is_empty());
    }

    #[test]
    fn test_report_serializes_flat() {
        let json = serde_json::to_value(run("2+")).unwrap();
        assert_eq!(json["primary"], "0");
        assert_eq!(json["secondary"], "2 +");
        assert_eq!(json["steps"][0]["primary"], "2");
        assert_eq!(json["state"]["pending_operator"], "Add");
    }
}
