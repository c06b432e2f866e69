use crate::apps::{AppRegistry, ProjectRegistry};
use crate::check_output::{CheckOutputOptions, exit_code, format_check_output};
use crate::checks::{CheckContext, CheckRegistry, CheckReport, Tag};
use crate::config::{AppFilter, Config};
use crate::migration::MigrationLayout;
use anyhow::{Result, anyhow};
use tracing::info;

/// Run the registered checks against a project and print the report
///
/// Returns the process exit code: non-zero when any unsilenced message is at
/// or above the fail level.
pub fn cmd_check(
    config: &Config,
    app_labels: &[String],
    tags: &[Tag],
    options: &CheckOutputOptions,
) -> Result<i32> {
    let registry = ProjectRegistry::load(config)?;
    let report = run_project_checks(config, &registry, app_labels, tags)?;

    info!(
        "{} issues found, {} silenced",
        report.issues.len(),
        report.silenced
    );

    let output = format_check_output(&report, options)?;
    print!("{}", output);

    Ok(exit_code(&report, options.fail_level))
}

/// Run every check in the requested tags against the given registry
pub fn run_project_checks(
    config: &Config,
    registry: &dyn AppRegistry,
    app_labels: &[String],
    tags: &[Tag],
) -> Result<CheckReport> {
    for label in app_labels {
        if registry.get_app_config(label).is_none() {
            return Err(anyhow!("No installed app with label '{}'.", label));
        }
    }

    let filter = AppFilter::new(&config.project, &config.discovery);
    let layout = MigrationLayout::new(&config.migrations);
    let ctx = CheckContext {
        registry,
        filter: &filter,
        layout: &layout,
        app_labels: (!app_labels.is_empty()).then_some(app_labels),
    };

    let checks = CheckRegistry::with_builtin_checks();
    let tags = (!tags.is_empty()).then_some(tags);
    let messages = checks.run_checks(&ctx, tags);

    Ok(CheckReport::new(messages, &config.checks.silenced))
}
