use crate::apps::{AppRegistry, ProjectRegistry, first_party_apps};
use crate::config::{AppFilter, Config};
use crate::migration::{MigrationDetails, MigrationLayout};
use anyhow::Result;
use console::style;

/// List first-party apps with their migrations directory and latest migration
pub fn cmd_apps(config: &Config) -> Result<()> {
    let registry = ProjectRegistry::load(config)?;
    let filter = AppFilter::new(&config.project, &config.discovery);
    let layout = MigrationLayout::new(&config.migrations);

    let lines = describe_apps(&registry, &filter, &layout);
    if lines.is_empty() {
        println!("No first-party apps found");
    } else {
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}

fn describe_apps(
    registry: &dyn AppRegistry,
    filter: &AppFilter,
    layout: &MigrationLayout,
) -> Vec<String> {
    first_party_apps(registry, filter)
        .map(|app| {
            let details = MigrationDetails::resolve(app, layout);
            match details.dir() {
                Some(dir) => format!(
                    "{}  {} ({} migrations, latest: {})",
                    style(&app.label).bold(),
                    dir.display(),
                    details.names().len(),
                    details.latest().unwrap_or("none")
                ),
                None => format!("{}  {}", style(&app.label).bold(), style("unmigrated").dim()),
            }
        })
        .collect()
}
