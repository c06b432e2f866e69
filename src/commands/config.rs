use crate::config::{Config, ConfigBuilder, ConfigInput};
use anyhow::{Result, anyhow};
use std::path::Path;

/// Config subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., migrations.marker_file, project.root)
        key: String,
    },

    /// Show the resolved configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },

    /// Validate configuration file
    Validate,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

/// Execute config command
pub fn cmd_config(config: &Config, config_file: &str, subcommand: &ConfigCommands) -> Result<()> {
    match subcommand {
        ConfigCommands::Get { key } => {
            println!("{}", get_config_value(config, key)?);
            Ok(())
        }
        ConfigCommands::Show { format } => {
            println!("{}", render_config(config, format)?);
            Ok(())
        }
        ConfigCommands::Validate => {
            validate_config_file(config_file)?;
            println!("Configuration file '{}' is valid", config_file);
            Ok(())
        }
    }
}

/// Get a configuration value by key
fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["project", "root"] => Ok(config.project.root.display().to_string()),
        ["project", "vendored_dirs"] => Ok(config.project.vendored_dirs.join(",")),

        ["discovery", "include"] => Ok(config.discovery.include.join(",")),
        ["discovery", "exclude"] => Ok(config.discovery.exclude.join(",")),

        ["migrations", "module_name"] => Ok(config.migrations.module_name.clone()),
        ["migrations", "extensions"] => Ok(config.migrations.extensions.join(",")),
        ["migrations", "package_marker"] => Ok(config
            .migrations
            .package_marker
            .clone()
            .unwrap_or_else(|| "(not set)".to_string())),
        ["migrations", "marker_file"] => Ok(config.migrations.marker_file.clone()),

        ["checks", "silenced"] => Ok(config.checks.silenced.join(",")),

        _ => Err(anyhow!("Unknown configuration key: {}", key)),
    }
}

fn render_config(config: &Config, format: &ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        ConfigFormat::Yaml => Ok(serde_yaml::to_string(config)?),
    }
}

/// Validate configuration file
fn validate_config_file(config_file: &str) -> Result<()> {
    let config_path = Path::new(config_file);
    if !config_path.exists() {
        return Err(anyhow!("Configuration file '{}' not found", config_file));
    }

    let config_str = std::fs::read_to_string(config_path)?;
    let config_input: ConfigInput =
        serde_yaml::from_str(&config_str).map_err(|e| anyhow!("Invalid YAML syntax: {}", e))?;

    ConfigBuilder::new()
        .with_file(config_input)
        .resolve()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(())
}
