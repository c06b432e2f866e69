use crate::checks::{CheckMessage, CheckReport, Level};
use anyhow::Result;
use console::style;
use serde::{Deserialize, Serialize};

/// Output format for check results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report grouped by level
    #[default]
    Human,
    /// JSON for CI integration
    Json,
}

/// Options for check output formatting
#[derive(Debug, Clone)]
pub struct CheckOutputOptions {
    pub format: OutputFormat,
    /// Messages at or above this level fail the run
    pub fail_level: Level,
    /// Emit ANSI colours in human output
    pub colors: bool,
}

impl Default for CheckOutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            fail_level: Level::Error,
            colors: false,
        }
    }
}

/// JSON output structure for check results (CI integration)
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckJsonOutput {
    /// "success" or "failure"
    pub status: String,
    /// Exit code for CI systems
    pub exit_code: i32,
    /// Every unsilenced message, in the order checks produced them
    pub issues: Vec<CheckMessage>,
    /// Number of messages dropped by silencing
    pub silenced: usize,
    /// Human-readable summary message
    pub message: String,
}

/// Exit code a check run should end with
pub fn exit_code(report: &CheckReport, fail_level: Level) -> i32 {
    if report.has_serious(fail_level) { 1 } else { 0 }
}

/// Format check results based on options
pub fn format_check_output(report: &CheckReport, options: &CheckOutputOptions) -> Result<String> {
    match options.format {
        OutputFormat::Json => {
            let code = exit_code(report, options.fail_level);
            let output = CheckJsonOutput {
                status: if code == 0 { "success" } else { "failure" }.to_string(),
                exit_code: code,
                issues: report.issues.clone(),
                silenced: report.silenced,
                message: summary_line(report),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Human => Ok(format_human_output(report, options)),
    }
}

/// "System check identified ..." closing line
fn summary_line(report: &CheckReport) -> String {
    let found = match report.issues.len() {
        0 => "no issues".to_string(),
        1 => "1 issue".to_string(),
        n => format!("{} issues", n),
    };
    format!(
        "System check identified {} ({} silenced).",
        found, report.silenced
    )
}

/// Format human-readable output, most serious levels first
fn format_human_output(report: &CheckReport, options: &CheckOutputOptions) -> String {
    let mut output = String::new();

    if !report.is_clean() {
        let header = if report.has_serious(options.fail_level) {
            "SystemCheckError: System check identified some issues:"
        } else {
            "System check identified some issues:"
        };
        output.push_str(header);
        output.push_str("\n\n");

        for level in [
            Level::Critical,
            Level::Error,
            Level::Warning,
            Level::Info,
            Level::Debug,
        ] {
            let messages: Vec<&CheckMessage> =
                report.issues.iter().filter(|m| m.level == level).collect();
            if messages.is_empty() {
                continue;
            }

            let heading = format!("{}:", level.heading());
            if options.colors {
                let styled = match level {
                    Level::Critical | Level::Error => style(heading).red().bold(),
                    Level::Warning => style(heading).yellow().bold(),
                    Level::Info | Level::Debug => style(heading).bold(),
                };
                output.push_str(&styled.to_string());
            } else {
                output.push_str(&heading);
            }
            output.push('\n');

            for message in messages {
                output.push_str(&message.to_string());
                output.push('\n');
            }
            output.push('\n');
        }
    }

    output.push_str(&summary_line(report));
    output.push('\n');
    output
}
