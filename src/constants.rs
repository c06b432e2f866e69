// Configuration file name
pub const CONFIG_FILENAME: &str = "maxmig.yaml";

// Marker file recording each app's latest migration
pub const MAX_MIGRATION_FILENAME: &str = "max_migration.txt";

// Migration module conventions
pub const MIGRATIONS_MODULE_NAME: &str = "migrations";
pub const MIGRATION_FILE_EXTENSION: &str = "py";
pub const PACKAGE_MARKER_FILENAME: &str = "__init__.py";

// Path segment identifying installed third-party code
pub const VENDORED_DIR: &str = "site-packages";

// Prefix for check message ids, e.g. "maxmig.E001"
pub const CHECK_ID_PREFIX: &str = "maxmig";

// Migration names starting with these characters are private or editor leftovers
pub const IGNORED_NAME_PREFIXES: [char; 2] = ['_', '~'];
