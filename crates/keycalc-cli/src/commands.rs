//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Keycalc: immediate-execution calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Calculator configuration file (YAML)
    #[arg(short, long, global = true, env = "KEYCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive terminal calculator
    Tui,

    /// Feed a key sequence through the calculator and print the display
    ///
    /// Each character is one key press. `=` is Enter, `<` is Backspace,
    /// `c` or `C` is Escape and `~` toggles the sign.
    Run(RunArgs),

    /// Show the effective calculator configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key sequence, e.g. "5+3=="
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// Print the display after every key
    #[arg(short, long)]
    pub steps: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the built-in defaults instead of the loaded file
    #[arg(long)]
    pub defaults: bool,
}

/// Output format for the run command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["keycalc", "run", "5+3=="]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.keys, "5+3==");
                assert!(!args.steps);
                assert_eq!(args.format, FormatArg::Text);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_leading_minus_keys() {
        let cli = Cli::try_parse_from(["keycalc", "run", "-5="]).unwrap();
        assert!(matches!(cli.command, Commands::Run(ref args) if args.keys == "-5="));
    }

    #[test]
    fn test_parse_run_flags() {
        let cli =
            Cli::try_parse_from(["keycalc", "run", "--steps", "--format", "json", "1+1="]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert!(args.steps);
                assert_eq!(args.format, FormatArg::Json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "keycalc", "-vv", "--color", "never", "--config", "calc.yaml", "config",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorArg::Never);
        assert_eq!(cli.config, Some(PathBuf::from("calc.yaml")));
        assert!(matches!(cli.command, Commands::Config(ConfigArgs { defaults: false })));
    }

    #[test]
    fn test_parse_tui() {
        let cli = Cli::try_parse_from(["keycalc", "tui", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Tui));
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(Cli::try_parse_from(["keycalc"]).is_err());
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
    }
}
