pub mod layout;
pub mod parsing;

pub use layout::{MigrationLayout, MigrationsModule};
pub use parsing::{discover_migration_names, latest_migration_name, parse_migration_filename};

use crate::apps::AppConfig;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Migrations found on disk for one app
///
/// Avoids loading the migrations themselves: only the module layout and the
/// file names matter here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDetails {
    pub app_label: String,
    dir: Option<PathBuf>,
    names: BTreeSet<String>,
}

impl MigrationDetails {
    pub fn resolve(app: &AppConfig, layout: &MigrationLayout) -> Self {
        let dir = match layout.resolve(app) {
            MigrationsModule::Package(dir) => Some(dir),
            MigrationsModule::Disabled => {
                debug!("Migrations disabled for '{}'", app.label);
                None
            }
            MigrationsModule::Missing => {
                debug!("'{}' is an unmigrated app", app.label);
                None
            }
            MigrationsModule::NotPackage(file) => {
                debug!(
                    "Ignoring non-package migrations module for '{}': {}",
                    app.label,
                    file.display()
                );
                None
            }
            MigrationsModule::Namespace(dir) => {
                debug!(
                    "Ignoring namespace migrations module for '{}': {}",
                    app.label,
                    dir.display()
                );
                None
            }
        };

        let names = match &dir {
            Some(dir) => discover_migration_names(dir, layout.extensions()).unwrap_or_else(|e| {
                warn!("Failed to list migrations in {}: {}", dir.display(), e);
                BTreeSet::new()
            }),
            None => BTreeSet::new(),
        };

        Self {
            app_label: app.label.clone(),
            dir,
            names,
        }
    }

    pub fn has_migrations(&self) -> bool {
        self.dir.is_some()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn latest(&self) -> Option<&str> {
        latest_migration_name(&self.names)
    }
}
