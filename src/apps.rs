//! Application registry: which apps exist and where they live on disk.
//!
//! The checker only ever sees `&dyn AppRegistry`, so tests and embedders can
//! hand it a fixed list while the CLI builds a [`ProjectRegistry`] from the
//! config file or by walking the project tree.

use crate::config::{AppEntry, AppFilter, Config};
use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where an app's migrations are expected to live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationsSource {
    /// `<app path>/<module name>`
    Conventional,
    /// An explicitly configured directory
    Custom(PathBuf),
    /// Migrations are turned off for this app
    Disabled,
}

/// A single installed application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub label: String,
    pub path: PathBuf,
    pub migrations: MigrationsSource,
}

impl AppConfig {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            migrations: MigrationsSource::Conventional,
        }
    }

    pub fn with_migrations(mut self, migrations: MigrationsSource) -> Self {
        self.migrations = migrations;
        self
    }
}

/// Enumerates every installed application, first-party or not
pub trait AppRegistry {
    fn app_configs(&self) -> &[AppConfig];

    fn get_app_config(&self, label: &str) -> Option<&AppConfig> {
        self.app_configs().iter().find(|app| app.label == label)
    }
}

impl AppRegistry for Vec<AppConfig> {
    fn app_configs(&self) -> &[AppConfig] {
        self
    }
}

/// Apps that belong to the project itself, skipping anything vendored
pub fn first_party_apps<'a>(
    registry: &'a dyn AppRegistry,
    filter: &'a AppFilter,
) -> impl Iterator<Item = &'a AppConfig> + 'a {
    registry.app_configs().iter().filter(move |app| {
        let vendored = filter.is_vendored(&app.path);
        if vendored {
            debug!("Skipping vendored app '{}' at {}", app.label, app.path.display());
        }
        !vendored
    })
}

/// Registry built from a project's config file, or discovered from its tree
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    apps: Vec<AppConfig>,
}

impl ProjectRegistry {
    pub fn load(config: &Config) -> Result<Self> {
        let apps = if config.apps.is_empty() {
            discover_apps(config)?
        } else {
            configured_apps(&config.project.root, &config.apps)
        };

        ensure_unique_labels(&apps)?;
        debug!("Registry holds {} apps", apps.len());

        Ok(Self { apps })
    }
}

impl AppRegistry for ProjectRegistry {
    fn app_configs(&self) -> &[AppConfig] {
        &self.apps
    }
}

fn configured_apps(root: &Path, entries: &[AppEntry]) -> Vec<AppConfig> {
    entries
        .iter()
        .map(|entry| {
            let path = root.join(&entry.path);
            let label = entry
                .label
                .clone()
                .unwrap_or_else(|| default_label(&path));

            let migrations = if !entry.migrate {
                MigrationsSource::Disabled
            } else if let Some(dir) = &entry.migrations_dir {
                MigrationsSource::Custom(root.join(dir))
            } else {
                MigrationsSource::Conventional
            };

            AppConfig::new(label, path).with_migrations(migrations)
        })
        .collect()
}

/// Every directory holding a `<module name>` directory is an app.
fn discover_apps(config: &Config) -> Result<Vec<AppConfig>> {
    let root = &config.project.root;
    if !root.is_dir() {
        return Err(anyhow!(
            "Project root is not a directory: {}",
            root.display()
        ));
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root {}", root.display()))?;

    let filter = AppFilter::new(&config.project, &config.discovery);
    let pattern = format!(
        "{}/**/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        glob::Pattern::escape(&config.migrations.module_name)
    );
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut apps = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let migrations_dir = match entry {
            Ok(path) => path,
            Err(e) => {
                debug!("Skipping unreadable path during discovery: {}", e);
                continue;
            }
        };
        if !migrations_dir.is_dir() {
            continue;
        }
        let Some(app_dir) = migrations_dir.parent() else {
            continue;
        };
        // The project root itself is never an app
        let Ok(relative) = app_dir.strip_prefix(&root) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        // Vendored apps never enter the registry, so their labels can't collide
        if filter.is_vendored(relative) {
            debug!("Discovery skips vendored {}", relative.display());
            continue;
        }
        if !filter.should_include_dir(relative) {
            debug!("Discovery excludes {}", relative.display());
            continue;
        }

        apps.push(AppConfig::new(default_label(app_dir), app_dir));
    }

    apps.sort_by(|a, b| a.path.cmp(&b.path));
    apps.dedup_by(|a, b| a.path == b.path);
    Ok(apps)
}

fn default_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn ensure_unique_labels(apps: &[AppConfig]) -> Result<()> {
    let duplicates: Vec<&str> = apps
        .iter()
        .map(|app| app.label.as_str())
        .duplicates()
        .sorted()
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Application labels aren't unique, duplicates: {}",
            duplicates.join(", ")
        ))
    }
}
