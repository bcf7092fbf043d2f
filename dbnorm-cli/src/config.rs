//! Connection settings for the CLI
//!
//! Sources, highest priority first:
//! 1. Command-line flags
//! 2. Environment variables (including ones loaded from `.env` files)
//! 3. `--config <file.toml>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dbnorm_core::config::{
    default_driver, ENV_DRIVER, ENV_HEALTH_INTERVAL, ENV_MAX_CONNECTIONS, ENV_MIGRATIONS_DIR,
    ENV_URL,
};
use dbnorm_core::DbConfig;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// TOML file with driver, url and optional tuning
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database driver (postgres, sqlite)
    #[arg(long, global = true, env = ENV_DRIVER)]
    pub driver: Option<String>,

    /// Connection URL
    #[arg(long, global = true, env = ENV_URL, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, global = true, env = ENV_MAX_CONNECTIONS)]
    pub max_connections: Option<u32>,

    /// Seconds between health probes
    #[arg(long, global = true, env = ENV_HEALTH_INTERVAL, value_name = "SECS")]
    pub health_interval: Option<u64>,

    /// Directory of <version>_<name>.sql migration files
    #[arg(long, global = true, env = ENV_MIGRATIONS_DIR, value_name = "DIR")]
    pub migrations: Option<PathBuf>,
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.dbnorm/.env
///
/// Runs before argument parsing (and so before tracing is up); returns the
/// files it loaded for logging afterwards.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = dirs::home_dir().map(|home| home.join(".dbnorm").join(".env")) {
        // dotenvy doesn't overwrite existing vars
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

impl ConnectionArgs {
    /// Merge flags and environment over the optional TOML file.
    pub fn resolve(&self) -> Result<DbConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let config = DbConfig::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                let url = self.database_url.clone().context(
                    "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or --config",
                )?;
                let driver = self
                    .driver
                    .clone()
                    .unwrap_or_else(|| default_driver(&url).to_string());
                DbConfig::new(driver, url)
            }
        };

        if let Some(driver) = &self.driver {
            config.driver = driver.clone();
        }
        if let Some(url) = &self.database_url {
            config.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if let Some(secs) = self.health_interval {
            config.health_interval_secs = secs;
        }
        if let Some(dir) = &self.migrations {
            config.migrations_dir = Some(dir.clone());
        }

        config.validate().context("Invalid database configuration")?;
        Ok(config)
    }
}
