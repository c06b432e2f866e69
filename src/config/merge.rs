use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            project: match (self.project, other.project) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            // An app list is replaced wholesale, never combined
            apps: self.apps.merge(other.apps),
            discovery: match (self.discovery, other.discovery) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            migrations: match (self.migrations, other.migrations) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            checks: self.checks.merge(other.checks),
        }
    }
}

// Custom merge implementations for complex types
impl ProjectInput {
    pub fn merge_with(self, other: ProjectInput) -> ProjectInput {
        ProjectInput {
            root: other.root.or(self.root),
            vendored_dirs: other.vendored_dirs.or(self.vendored_dirs),
        }
    }
}

impl DiscoveryInput {
    pub fn merge_with(self, other: DiscoveryInput) -> DiscoveryInput {
        DiscoveryInput {
            include: other.include.or(self.include),
            exclude: other.exclude.or(self.exclude),
        }
    }
}

impl MigrationsInput {
    pub fn merge_with(self, other: MigrationsInput) -> MigrationsInput {
        MigrationsInput {
            module_name: other.module_name.or(self.module_name),
            extensions: other.extensions.or(self.extensions),
            package_marker: other.package_marker.or(self.package_marker),
            marker_file: other.marker_file.or(self.marker_file),
        }
    }
}
