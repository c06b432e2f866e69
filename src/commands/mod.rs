pub mod apps;
pub mod check;
pub mod config;

// Re-export all command functions
pub use apps::cmd_apps;
pub use check::{cmd_check, run_project_checks};
pub use config::cmd_config;
