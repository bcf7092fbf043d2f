//! Long-running bootstrap: open, migrate, keep probing until shutdown
//!
//! Graceful shutdown on SIGTERM/Ctrl+C stops the health loop and closes the
//! pool before exit.

use anyhow::{Context, Result};
use dbnorm_core::{bootstrap, migrate, DbConfig};
use tracing::info;

pub async fn run_watch(config: DbConfig) -> Result<()> {
    let migrations = migrate::from_dir(config.migrations_dir.as_deref());
    let db = bootstrap(&config, &*migrations)
        .await
        .context("Bootstrap failed")?;

    info!(
        interval_secs = config.health_interval_secs,
        "Watching database health (Ctrl+C to stop)"
    );

    let signal = shutdown_signal().await;
    db.shutdown().await;
    signal?;

    info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .context("failed to install Ctrl+C handler")
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
            res
        }
        res = terminate => {
            info!("Received SIGTERM, starting shutdown");
            res
        }
    }
}
