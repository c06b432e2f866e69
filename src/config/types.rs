use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub project: Option<ProjectInput>,
    pub apps: Option<Vec<AppInput>>,
    pub discovery: Option<DiscoveryInput>,
    pub migrations: Option<MigrationsInput>,
    pub checks: Option<ChecksInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub project: Project,
    pub apps: Vec<AppEntry>,
    pub discovery: Discovery,
    pub migrations: Migrations,
    pub checks: Checks,
}

// Project configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectInput {
    pub root: Option<String>,
    pub vendored_dirs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Directory that app paths and discovery are relative to
    pub root: PathBuf,
    /// Path segments that mark an app as third-party
    pub vendored_dirs: Vec<String>,
}

// Explicit app list. When empty, apps are discovered under the project root.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppInput {
    pub path: String,
    pub label: Option<String>,
    pub migrations_dir: Option<String>,
    pub migrate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub path: String,
    pub label: Option<String>,
    pub migrations_dir: Option<String>,
    pub migrate: bool,
}

// Discovery configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DiscoveryInput {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    /// Glob patterns (relative to the root) an app directory must match
    pub include: Vec<String>,
    /// Glob patterns (relative to the root) that drop an app directory
    pub exclude: Vec<String>,
}

// Migration module conventions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MigrationsInput {
    pub module_name: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub package_marker: Option<String>,
    pub marker_file: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Migrations {
    pub module_name: String,
    pub extensions: Vec<String>,
    /// File that makes a migrations directory a regular package; `None` disables the check
    pub package_marker: Option<String>,
    pub marker_file: String,
}

// Check run configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChecksInput {
    pub silenced: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Checks {
    /// Check message ids that are never reported
    pub silenced: Vec<String>,
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    #[arg(long, help = "Project root directory")]
    pub root: Option<String>,

    #[arg(long, help = "Path segment marking third-party apps (repeatable)")]
    pub vendored_dir: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MigrationArgs {
    #[arg(long, help = "Name of each app's migrations directory")]
    pub migrations_module: Option<String>,

    #[arg(long, help = "Name of the max migration marker file")]
    pub marker_file: Option<String>,
}

// Conversion functions from CLI args to config input
impl From<ProjectArgs> for ProjectInput {
    fn from(args: ProjectArgs) -> Self {
        Self {
            root: args.root,
            vendored_dirs: args.vendored_dir,
        }
    }
}

impl From<MigrationArgs> for MigrationsInput {
    fn from(args: MigrationArgs) -> Self {
        Self {
            module_name: args.migrations_module,
            extensions: None,
            package_marker: None,
            marker_file: args.marker_file,
        }
    }
}

impl From<AppInput> for AppEntry {
    fn from(input: AppInput) -> Self {
        Self {
            path: input.path,
            label: input.label,
            migrations_dir: input.migrations_dir,
            migrate: input.migrate.unwrap_or(true),
        }
    }
}
