//! One-shot connectivity check
//!
//! Opens the handle, probes once, closes it. Exits non-zero when the
//! database cannot be reached.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dbnorm_core::{Database, DbConfig, HealthStatus};

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Print the probe result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_check(config: DbConfig, args: CheckArgs) -> Result<()> {
    let db = Database::initialize(&config)
        .await
        .with_context(|| format!("Failed to open {}", config.redacted_url()))?;

    let report = db.probe_once().await;
    db.shutdown().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.status {
            HealthStatus::Reachable => println!(
                "DB ok ({} via {}, {} ms)",
                config.redacted_url(),
                config.driver,
                report.latency_ms
            ),
            HealthStatus::Unreachable { detail } => println!("DB not ok: {}", detail),
        }
    }

    if !report.status.is_reachable() {
        bail!("database unreachable");
    }
    Ok(())
}
