use crate::config::{merge::Merge, types::*};
use anyhow::{Result, anyhow};
use std::path::PathBuf;

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            project: self.resolve_project(&defaults.project),
            apps: self.resolve_apps()?,
            discovery: self.resolve_discovery(&defaults.discovery),
            migrations: self.resolve_migrations(&defaults.migrations)?,
            checks: self.resolve_checks(&defaults.checks),
        })
    }

    fn resolve_project(&self, defaults: &Project) -> Project {
        let project_input = self.config_input.project.as_ref();

        Project {
            root: project_input
                .and_then(|p| p.root.as_ref())
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.root.clone()),
            vendored_dirs: project_input
                .and_then(|p| p.vendored_dirs.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.vendored_dirs.clone()),
        }
    }

    fn resolve_apps(&self) -> Result<Vec<AppEntry>> {
        let apps = self.config_input.apps.clone().unwrap_or_default();

        if let Some(app) = apps.iter().find(|a| a.path.trim().is_empty()) {
            return Err(anyhow!(
                "App entry with label {:?} has an empty path",
                app.label.as_deref().unwrap_or("")
            ));
        }

        Ok(apps.into_iter().map(AppEntry::from).collect())
    }

    fn resolve_discovery(&self, defaults: &Discovery) -> Discovery {
        let discovery_input = self.config_input.discovery.as_ref();

        Discovery {
            include: discovery_input
                .and_then(|d| d.include.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.include.clone()),
            exclude: discovery_input
                .and_then(|d| d.exclude.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.exclude.clone()),
        }
    }

    fn resolve_migrations(&self, defaults: &Migrations) -> Result<Migrations> {
        let mig_input = self.config_input.migrations.as_ref();

        let module_name = mig_input
            .and_then(|m| m.module_name.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.module_name.clone());
        if module_name.is_empty() || module_name.contains(['/', '\\']) {
            return Err(anyhow!(
                "Invalid migrations module name '{}': expected a single directory name",
                module_name
            ));
        }

        let extensions: Vec<String> = mig_input
            .and_then(|m| m.extensions.as_ref())
            .map(|exts| {
                exts.iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect()
            })
            .unwrap_or_else(|| defaults.extensions.clone());
        if extensions.is_empty() {
            return Err(anyhow!("At least one migration file extension is required"));
        }

        // An empty marker name turns namespace detection off
        let package_marker = match mig_input.and_then(|m| m.package_marker.as_ref()) {
            Some(marker) if marker.is_empty() => None,
            Some(marker) => Some(marker.clone()),
            None => defaults.package_marker.clone(),
        };

        Ok(Migrations {
            module_name,
            extensions,
            package_marker,
            marker_file: mig_input
                .and_then(|m| m.marker_file.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.marker_file.clone()),
        })
    }

    fn resolve_checks(&self, defaults: &Checks) -> Checks {
        Checks {
            silenced: self
                .config_input
                .checks
                .as_ref()
                .and_then(|c| c.silenced.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.silenced.clone()),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
