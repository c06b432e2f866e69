use crate::config::types::*;
use crate::constants::{
    MAX_MIGRATION_FILENAME, MIGRATION_FILE_EXTENSION, MIGRATIONS_MODULE_NAME,
    PACKAGE_MARKER_FILENAME, VENDORED_DIR,
};
use std::path::PathBuf;

// Config, Discovery and Checks derive Default

impl Default for Project {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            vendored_dirs: vec![VENDORED_DIR.to_string()],
        }
    }
}

impl Default for Migrations {
    fn default() -> Self {
        Self {
            module_name: MIGRATIONS_MODULE_NAME.to_string(),
            extensions: vec![MIGRATION_FILE_EXTENSION.to_string()],
            package_marker: Some(PACKAGE_MARKER_FILENAME.to_string()),
            marker_file: MAX_MIGRATION_FILENAME.to_string(),
        }
    }
}
