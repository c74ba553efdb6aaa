//! Output formatting for the run command

use console::{style, Term};
use keycalc::core::Display;
use serde::{Deserialize, Serialize};

use crate::error::CliResult;
use crate::runner::RunReport;

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes run reports to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Output format
    pub format: OutputFormat,
}

impl Reporter {
    /// Create a reporter on stdout
    #[must_use]
    pub fn new(format: OutputFormat, use_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            format,
        }
    }

    /// Writes a report
    pub fn report(&self, report: &RunReport, steps: bool) -> CliResult<()> {
        for line in self.render(report, steps)? {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Renders a report into output lines
    pub fn render(&self, report: &RunReport, steps: bool) -> CliResult<Vec<String>> {
        match self.format {
            OutputFormat::Json => {
                let json = if steps {
                    serde_json::to_string_pretty(report)?
                } else {
                    serde_json::to_string_pretty(&report.summary())?
                };
                Ok(vec![json])
            }
            OutputFormat::Text => {
                let mut lines = Vec::new();
                if steps {
                    for step in &report.steps {
                        lines.push(self.step_line(step.key, &step.display, step.errored));
                    }
                    lines.push(String::new());
                }
                lines.push(self.display_line(&report.display, report.errored));
                Ok(lines)
            }
        }
    }

    fn step_line(&self, key: char, display: &Display, errored: bool) -> String {
        let key = if self.use_color {
            style(format!("[{key}]")).yellow().to_string()
        } else {
            format!("[{key}]")
        };
        format!("{key} {}", self.display_line(display, errored))
    }

    fn display_line(&self, display: &Display, errored: bool) -> String {
        let primary = if !self.use_color {
            display.primary.clone()
        } else if errored {
            style(&display.primary).red().bold().to_string()
        } else {
            style(&display.primary).green().bold().to_string()
        };

        if display.secondary.is_empty() {
            primary
        } else if self.use_color {
            format!("{primary}  {}", style(&display.secondary).dim())
        } else {
            format!("{primary}  ({})", display.secondary)
        }
    }
}
