//! Schema migrations
//!
//! Bootstrap only needs "run your steps against this pool"; what the steps are
//! is up to the implementor. A directory of sqlx-style `<version>_<name>.sql`
//! files covers the common case.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::AnyPool;
use tracing::info;

use crate::error::{DbError, Result};

/// Runs schema migrations against a live pool.
#[async_trait]
pub trait Migrate: Send + Sync {
    async fn migrate(&self, pool: &AnyPool) -> Result<()>;
}

/// Nothing to migrate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMigrations;

#[async_trait]
impl Migrate for NoMigrations {
    async fn migrate(&self, _pool: &AnyPool) -> Result<()> {
        info!("No migrations configured");
        Ok(())
    }
}

/// An already-built sqlx migrator, e.g. from `sqlx::migrate!()`.
#[async_trait]
impl Migrate for Migrator {
    async fn migrate(&self, pool: &AnyPool) -> Result<()> {
        self.run(pool).await?;
        info!(known = self.iter().count(), "Migrations up to date");
        Ok(())
    }
}

/// Migration files read from a directory at runtime.
#[derive(Debug, Clone)]
pub struct DirMigrations {
    dir: PathBuf,
}

impl DirMigrations {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Migrate for DirMigrations {
    async fn migrate(&self, pool: &AnyPool) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(DbError::migration(format!(
                "migrations directory not found: {}",
                self.dir.display()
            )));
        }

        info!(dir = %self.dir.display(), "Running migrations...");
        let migrator = Migrator::new(self.dir.as_path()).await?;
        migrator.migrate(pool).await
    }
}

/// Migrations for an optional directory: the directory's files, or nothing.
pub fn from_dir(dir: Option<&Path>) -> Box<dyn Migrate> {
    match dir {
        Some(dir) => Box::new(DirMigrations::new(dir)),
        None => Box::new(NoMigrations),
    }
}
