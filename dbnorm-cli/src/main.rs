//! dbnorm CLI - bring up the shared database handle and watch it
//!
//! Subcommands:
//! - `check`: open, probe once, report
//! - `migrate`: open and apply migrations from a directory
//! - `watch`: open, migrate, run the periodic health check until Ctrl+C
//! - `codes`: print the driver error classification tables

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;

use commands::check::CheckArgs;
use commands::codes::CodesArgs;
use config::ConnectionArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "dbnorm",
    author,
    version,
    about = "Open a shared database handle, keep it alive, classify its errors",
    long_about = "Bootstraps a single database connection pool (postgres or sqlite), runs \
                  migrations, and probes the database on a fixed interval. Driver error codes \
                  are mapped to a small universal vocabulary."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Probe the database once and report whether it is reachable
    Check(CheckArgs),
    /// Apply migrations from --migrations / DB_MIGRATIONS_DIR and exit
    Migrate,
    /// Bootstrap and keep health-checking until Ctrl+C or SIGTERM
    Watch,
    /// Show which driver error codes map to which error kind
    Codes(CodesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.dbnorm)");
    }
    for path in &env_files {
        debug!("Loaded .env from {}", path.display());
    }

    match cli.command {
        Commands::Check(args) => commands::run_check(cli.connection.resolve()?, args).await?,
        Commands::Migrate => commands::run_migrate(cli.connection.resolve()?).await?,
        Commands::Watch => commands::run_watch(cli.connection.resolve()?).await?,
        Commands::Codes(args) => commands::run_codes(cli.connection.driver.as_deref(), args)?,
    }
    Ok(())
}
