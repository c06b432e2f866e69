use crate::apps::{AppConfig, MigrationsSource};
use crate::config::Migrations;
use std::path::{Path, PathBuf};

/// What an app's migrations module turned out to be on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationsModule {
    /// Migrations switched off for the app
    Disabled,
    /// No migrations module at all
    Missing,
    /// A single-file module rather than a directory
    NotPackage(PathBuf),
    /// A directory without the package marker file
    Namespace(PathBuf),
    /// A regular migrations package
    Package(PathBuf),
}

/// Naming conventions for locating and reading migrations modules
#[derive(Debug, Clone)]
pub struct MigrationLayout {
    module_name: String,
    extensions: Vec<String>,
    package_marker: Option<String>,
    marker_file: String,
}

impl MigrationLayout {
    pub fn new(settings: &Migrations) -> Self {
        Self {
            module_name: settings.module_name.clone(),
            extensions: settings.extensions.clone(),
            package_marker: settings.package_marker.clone(),
            marker_file: settings.marker_file.clone(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn marker_file(&self) -> &str {
        &self.marker_file
    }

    /// Directory the app's migrations should live in, if migrations are enabled
    pub fn migrations_path(&self, app: &AppConfig) -> Option<PathBuf> {
        match &app.migrations {
            MigrationsSource::Conventional => Some(app.path.join(&self.module_name)),
            MigrationsSource::Custom(dir) => Some(dir.clone()),
            MigrationsSource::Disabled => None,
        }
    }

    /// Locate the app's migrations module and classify it
    pub fn resolve(&self, app: &AppConfig) -> MigrationsModule {
        let Some(dir) = self.migrations_path(app) else {
            return MigrationsModule::Disabled;
        };

        if dir.is_dir() {
            return match &self.package_marker {
                Some(marker) if !dir.join(marker).is_file() => MigrationsModule::Namespace(dir),
                _ => MigrationsModule::Package(dir),
            };
        }

        match self.single_file_module(&dir) {
            Some(file) => MigrationsModule::NotPackage(file),
            None => MigrationsModule::Missing,
        }
    }

    /// `migrations.py` (or another configured extension) standing in for the directory
    fn single_file_module(&self, dir: &Path) -> Option<PathBuf> {
        let name = dir.file_name()?.to_string_lossy().into_owned();
        let parent = dir.parent()?;

        self.extensions
            .iter()
            .map(|ext| parent.join(format!("{}.{}", name, ext)))
            .find(|candidate| candidate.is_file())
    }
}

impl Default for MigrationLayout {
    fn default() -> Self {
        Self::new(&Migrations::default())
    }
}
