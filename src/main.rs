use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use maxmig::check_output::{CheckOutputOptions, OutputFormat};
use maxmig::checks::{Level, Tag};
use maxmig::commands;
use maxmig::config;
use maxmig::constants::CONFIG_FILENAME;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Only check these app labels
    app_labels: Vec<String>,

    /// Run only checks with these tags
    #[arg(long = "tag", short = 't', value_enum)]
    tags: Vec<Tag>,

    /// Message level that makes the command exit non-zero
    #[arg(long, value_enum, default_value = "error")]
    fail_level: Level,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,

    #[command(flatten)]
    project_args: config::ProjectArgs,

    #[command(flatten)]
    migration_args: config::MigrationArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Check max migration markers against migration files
    Check(CheckArgs),

    /// List first-party apps and their latest migrations
    Apps {
        #[command(flatten)]
        project_args: config::ProjectArgs,

        #[command(flatten)]
        migration_args: config::MigrationArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    let code = run_main(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    file_config: config::ConfigInput,
    project_args: &config::ProjectArgs,
    migration_args: &config::MigrationArgs,
) -> Result<config::Config> {
    let cli_config = config::ConfigInput {
        project: Some(project_args.clone().into()),
        apps: None,
        discovery: None,
        migrations: Some(migration_args.clone().into()),
        checks: None,
    };

    config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()
}

fn run_main(cli: Cli) -> Result<i32> {
    let file_config = config::load_config(&cli.config_file)?;

    match &cli.command {
        Commands::Check(args) => {
            let config = resolve_config(file_config, &args.project_args, &args.migration_args)?;

            let options = CheckOutputOptions {
                format: args.format,
                fail_level: args.fail_level,
                colors: console::colors_enabled(),
            };

            info!("Checking max migration files");
            commands::cmd_check(&config, &args.app_labels, &args.tags, &options)
        }
        Commands::Apps {
            project_args,
            migration_args,
        } => {
            let config = resolve_config(file_config, project_args, migration_args)?;

            info!("Listing first-party apps");
            commands::cmd_apps(&config)?;
            Ok(0)
        }
        Commands::Config { command } => {
            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .resolve()?;

            commands::cmd_config(&config, &cli.config_file, command)?;
            Ok(0)
        }
    }
}
