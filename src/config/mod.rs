pub mod builder;
pub mod defaults;
pub mod filter;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use filter::AppFilter;
pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Main configuration loading function
///
/// A relative `project.root` in the file is rebased onto the directory holding
/// the file, and a file without a root uses that directory itself.
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    let config_dir = match Path::new(config_file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut config_input: ConfigInput = if Path::new(config_file).exists() {
        let contents = std::fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file {}", config_file))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", config_file))?
    } else {
        ConfigInput::default()
    };

    let project = config_input.project.get_or_insert_with(ProjectInput::default);
    project.root = Some(match project.root.as_deref() {
        Some(root) if Path::new(root).is_absolute() => root.to_string(),
        Some(root) => config_dir.join(root).to_string_lossy().into_owned(),
        None => config_dir.to_string_lossy().into_owned(),
    });

    Ok(config_input)
}
