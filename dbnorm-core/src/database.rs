//! The process-wide database handle
//!
//! `Database` is created once at startup and then shared by reference (or
//! `Arc`) with everything that needs to query. Creating a second one in the
//! same process is a logic error and is refused with
//! [`DbError::AlreadyInitialized`].

use std::sync::atomic::{AtomicBool, Ordering};

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tracing::{debug, info};

use crate::classify::{classify, Classification};
use crate::config::DbConfig;
use crate::detail::{duplicate_key_name, ContractViolation};
use crate::driver::Driver;
use crate::error::{DbError, Result};
use crate::health::{probe_once, HealthCheck, HealthReport, HealthSink, TracingSink};

/// Set by the first `Database::initialize` call and never cleared.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Owner of the shared connection pool and its health check.
#[derive(Debug)]
pub struct Database {
    pool: AnyPool,
    driver: Driver,
    health: HealthCheck,
}

impl Database {
    /// Open the handle and start health checks that log through `tracing`.
    pub async fn initialize(config: &DbConfig) -> Result<Self> {
        Self::initialize_with_sink(config, TracingSink).await
    }

    /// Open the handle and start health checks reporting to `sink`.
    ///
    /// Configuration problems are reported before the once-per-process slot
    /// is claimed; a failed connect still consumes it.
    pub async fn initialize_with_sink<S: HealthSink>(config: &DbConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let driver = config.driver()?;

        INITIALIZED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| DbError::AlreadyInitialized)?;

        install_default_drivers();
        info!(%driver, url = %config.redacted_url(), "Opening database");

        let mut options = AnyPoolOptions::new().max_connections(config.pool_size());
        if config.is_in_memory() {
            if config.max_connections > 1 {
                debug!(
                    requested = config.max_connections,
                    "In-memory SQLite, pool limited to one connection"
                );
            }
            // The database goes away with its last connection
            options = options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = options
            .connect(&config.url)
            .await
            .map_err(|source| DbError::Connect { source })?;

        let health = HealthCheck::spawn(pool.clone(), config.health_interval(), sink);
        info!(%driver, "Database ready");

        Ok(Self {
            pool,
            driver,
            health,
        })
    }

    /// The shared pool, for running queries.
    pub fn connection(&self) -> &AnyPool {
        &self.pool
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Classify a query error with this database's driver table.
    pub fn classify<'e>(&self, err: Option<&'e sqlx::Error>) -> Classification<'e> {
        classify(self.driver, err)
    }

    /// Constraint name of a duplicate, using this database's driver.
    pub fn duplicate_key_name(
        &self,
        err: &sqlx::Error,
    ) -> std::result::Result<String, ContractViolation> {
        duplicate_key_name(self.driver, err)
    }

    /// Probe right now, outside the periodic loop.
    pub async fn probe_once(&self) -> HealthReport {
        probe_once(&self.pool).await
    }

    pub fn health(&self) -> &HealthCheck {
        &self.health
    }

    /// Stop health checks and close every pooled connection.
    ///
    /// The once-per-process slot stays claimed.
    pub async fn shutdown(self) {
        self.health.shutdown().await;
        self.pool.close().await;
        info!("Database closed");
    }
}

/// Whether a `Database` has been initialized in this process.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
