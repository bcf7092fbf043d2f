//! Startup sequence: open the handle, start health checks, migrate.

use tracing::{error, info};

use crate::config::DbConfig;
use crate::database::Database;
use crate::error::Result;
use crate::migrate::Migrate;

/// Bring the database up for this process.
///
/// Runs `migrations` once against the fresh pool. If they fail the handle is
/// shut down and the error returned; callers are expected to abort.
pub async fn bootstrap<M>(config: &DbConfig, migrations: &M) -> Result<Database>
where
    M: Migrate + ?Sized,
{
    let db = Database::initialize(config).await?;

    if let Err(err) = migrations.migrate(db.connection()).await {
        error!("Migration failed: {}", err);
        db.shutdown().await;
        return Err(err);
    }

    info!(driver = %db.driver(), "Bootstrap complete");
    Ok(db)
}
