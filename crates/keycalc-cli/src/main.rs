//! Keycalc: an immediate-execution calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc tui                      # Interactive keypad
//! keycalc run "5+3=="              # Prints 11
//! keycalc run --steps "50+10%"     # Display after every key
//! keycalc run -f json "1/0="       # Machine-readable result
//! keycalc --config calc.yaml config
//! ```

use clap::Parser;
use keycalc::config::CalcConfig;
use keycalc_cli::{
    logging, run_script, tui, Cli, CliConfig, CliResult, Commands, ConfigArgs, Reporter, RunArgs,
    Verbosity,
};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    if matches!(cli.command, Commands::Tui) {
        logging::init_for_tui(config.verbosity)?;
    } else {
        logging::init_stderr(config.verbosity);
    }
    debug!(?config, "cli configured");

    match cli.command {
        Commands::Tui => tui::run(config.load_calc_config()?),
        Commands::Run(args) => run_keys(&config, &args),
        Commands::Config(args) => run_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.into())
        .with_config_file(cli.config.as_deref())
}

fn run_keys(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let report = run_script(&args.keys, config.load_calc_config()?)?;
    Reporter::new(args.format.into(), config.color.should_color()).report(&report, args.steps)
}

fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let calc = if args.defaults {
        CalcConfig::default()
    } else {
        config.load_calc_config()?
    };
    print!("{}", calc.to_yaml()?);
    Ok(())
}
