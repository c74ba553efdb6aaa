//! CLI configuration

use std::path::{Path, PathBuf};

use keycalc::config::CalcConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Maps the `-v` count and `-q` flag to a level
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "keycalc=debug,keycalc_cli=debug,warn",
            Self::Debug => "keycalc=trace,keycalc_cli=trace,info",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Calculator configuration file, if any
    pub config_file: Option<PathBuf>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set the calculator configuration file
    #[must_use]
    pub fn with_config_file(mut self, path: Option<impl AsRef<Path>>) -> Self {
        self.config_file = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Loads the calculator configuration, or the defaults without a file
    pub fn load_calc_config(&self) -> CliResult<CalcConfig> {
        match &self.config_file {
            Some(path) => Ok(CalcConfig::load(path)?),
            None => Ok(CalcConfig::default()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(3, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_checks() {
        assert!(!Verbosity::Quiet.is_verbose());
        assert!(!Verbosity::Normal.is_verbose());
        assert!(Verbosity::Verbose.is_verbose());
        assert!(Verbosity::Debug.is_verbose());
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(Verbosity::Normal.log_directive(), "warn");
        assert!(Verbosity::Debug.log_directive().contains("keycalc=trace"));
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_cli_config_builder() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Verbose)
            .with_color(ColorChoice::Never)
            .with_config_file(Some("calc.yaml"));
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.config_file, Some(PathBuf::from("calc.yaml")));
    }

    #[test]
    fn test_load_defaults_without_file() {
        let calc = CliConfig::new().load_calc_config().unwrap();
        assert_eq!(calc, CalcConfig::default());
    }

    #[test]
    fn test_load_calc_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "symbols: ascii").unwrap();
        let calc = CliConfig::new()
            .with_config_file(Some(file.path()))
            .load_calc_config()
            .unwrap();
        assert_eq!(calc.symbols, keycalc::config::SymbolStyle::Ascii);
    }

    #[test]
    fn test_load_calc_config_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "error_marker: '3.5'").unwrap();
        let err = CliConfig::new()
            .with_config_file(Some(file.path()))
            .load_calc_config()
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
