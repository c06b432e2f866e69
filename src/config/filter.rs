use crate::config::types::{Discovery, Project};
use glob::Pattern;
use std::path::{Component, Path};

/// Path filter deciding which app directories maxmig treats as first-party
pub struct AppFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    vendored_dirs: Vec<String>,
}

impl AppFilter {
    /// Create a new app filter from configuration
    pub fn new(project: &Project, discovery: &Discovery) -> Self {
        Self {
            include: discovery.include.clone(),
            exclude: discovery.exclude.clone(),
            vendored_dirs: project.vendored_dirs.clone(),
        }
    }

    /// Check if any component of the path is a vendored-dependency directory
    pub fn is_vendored(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(segment) => self
                .vendored_dirs
                .iter()
                .any(|vendored| segment == vendored.as_str()),
            _ => false,
        })
    }

    /// Check if a discovered app directory (relative to the project root) should be included
    pub fn should_include_dir(&self, relative_dir: &Path) -> bool {
        let path = relative_dir.to_string_lossy().replace('\\', "/");

        // Check exclude patterns first
        if self.matches_patterns(&self.exclude, &path) {
            return false;
        }

        // If include patterns are specified, the directory must match one of them
        if !self.include.is_empty() {
            return self.matches_patterns(&self.include, &path);
        }

        true
    }

    /// Check if a path matches any of the glob patterns
    fn matches_patterns(&self, patterns: &[String], path: &str) -> bool {
        patterns.iter().any(|pattern| {
            Pattern::new(pattern)
                .map(|p| p.matches(path))
                .unwrap_or(false)
        })
    }
}
