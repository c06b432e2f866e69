use crate::constants::IGNORED_NAME_PREFIXES;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// Parse a migration filename like "0002_add_field.py" into its name
///
/// Returns `None` for files that are not migrations: wrong extension, private
/// or editor-backup names (leading `_` or `~`), and stems containing a dot.
pub fn parse_migration_filename(filename: &str, extensions: &[String]) -> Option<String> {
    let (stem, extension) = filename.rsplit_once('.')?;

    if !extensions.iter().any(|ext| ext == extension) {
        return None;
    }

    if stem.is_empty() || stem.contains('.') || stem.starts_with(IGNORED_NAME_PREFIXES) {
        return None;
    }

    Some(stem.to_string())
}

/// Find all migration names in a directory
///
/// Names are deduplicated (e.g. two extensions for the same stem) and come
/// back in ascending string order. Sub-directories are never migrations.
pub fn discover_migration_names(
    migrations_dir: &Path,
    extensions: &[String],
) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in std::fs::read_dir(migrations_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file()
            && let Some(filename) = path.file_name().and_then(|n| n.to_str())
            && let Some(name) = parse_migration_filename(filename, extensions)
        {
            names.insert(name);
        }
    }

    Ok(names)
}

/// The latest migration under plain string ordering
pub fn latest_migration_name(names: &BTreeSet<String>) -> Option<&str> {
    names.last().map(String::as_str)
}
