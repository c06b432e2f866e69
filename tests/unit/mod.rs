pub mod app_discovery;
pub mod max_migration_checks;
