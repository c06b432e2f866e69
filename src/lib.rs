//! Checks that every app's `max_migration.txt` names its latest migration.
//!
//! A marker file per migrations directory records the newest migration. When
//! two branches each add a migration, git merges both marker lines (or one
//! side's name wins), and the check flags it before the conflicting
//! migrations reach a shared database.

pub mod apps;
pub mod check_output;
pub mod checks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod migration;
