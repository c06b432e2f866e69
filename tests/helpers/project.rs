use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project tree with apps, migrations and marker files
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let project_root = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            project_root,
        }
    }

    /// Create `<path>/migrations` as a package holding the given migrations
    pub fn add_app(&self, path: &str, migrations: &[&str]) -> Result<PathBuf> {
        let migrations_dir = self.project_root.join(path).join("migrations");
        fs::create_dir_all(&migrations_dir)?;
        fs::write(migrations_dir.join("__init__.py"), "")?;

        for name in migrations {
            fs::write(
                migrations_dir.join(format!("{}.py", name)),
                "# migration\n",
            )?;
        }

        Ok(migrations_dir)
    }

    /// Create an app directory without any migrations module
    pub fn add_unmigrated_app(&self, path: &str) -> Result<PathBuf> {
        let app_dir = self.project_root.join(path);
        fs::create_dir_all(&app_dir)?;
        fs::write(app_dir.join("models.py"), "")?;
        Ok(app_dir)
    }

    pub fn write_marker(&self, app_path: &str, contents: &str) -> Result<()> {
        fs::write(self.marker_path(app_path), contents)?;
        Ok(())
    }

    pub fn marker_path(&self, app_path: &str) -> PathBuf {
        self.project_root
            .join(app_path)
            .join("migrations")
            .join("max_migration.txt")
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        fs::write(self.project_root.join("maxmig.yaml"), contents)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    /// Command running the maxmig binary from the project root
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("maxmig").unwrap();
        cmd.current_dir(&self.project_root);
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
