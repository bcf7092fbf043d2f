//! Run pending migrations and exit

use anyhow::{Context, Result};
use dbnorm_core::{bootstrap, DbConfig, DirMigrations};

pub async fn run_migrate(config: DbConfig) -> Result<()> {
    let dir = config
        .migrations_dir
        .clone()
        .context("No migrations directory. Set via --migrations or DB_MIGRATIONS_DIR")?;

    let db = bootstrap(&config, &DirMigrations::new(&dir))
        .await
        .context("Migration failed")?;
    db.shutdown().await;

    println!("Migrations from {} applied", dir.display());
    Ok(())
}
