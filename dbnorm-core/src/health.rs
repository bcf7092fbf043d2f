//! Background health check
//!
//! A single task pings the database on a fixed interval and reports each
//! result. It never touches the handle (reconnecting is the pool's job) and
//! never stops because a probe failed: errors and panics inside one probe are
//! caught, reported as unreachable, and the next tick tries again. The task
//! ends only when its cancellation token fires.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use sqlx::{AnyPool, Connection};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

/// Something that can be asked "are you still there?".
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    async fn probe(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl Probe for AnyPool {
    async fn probe(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.acquire().await?;
        conn.ping().await
    }
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    Reachable,
    Unreachable { detail: String },
}

impl HealthStatus {
    pub fn is_reachable(&self) -> bool {
        matches!(self, HealthStatus::Reachable)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    #[serde(flatten)]
    pub status: HealthStatus,
    pub checked_at: DateTime<Utc>,
    pub latency_ms: u64,
}

/// Receives every report the loop produces.
pub trait HealthSink: Send + Sync + 'static {
    fn report(&self, report: &HealthReport);
}

/// Logs reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl HealthSink for TracingSink {
    fn report(&self, report: &HealthReport) {
        match &report.status {
            HealthStatus::Reachable => info!(latency_ms = report.latency_ms, "DB ok"),
            HealthStatus::Unreachable { detail } => {
                warn!(latency_ms = report.latency_ms, "DB not ok: {}", detail)
            }
        }
    }
}

/// Run one probe, turning errors and panics into an unreachable status.
pub async fn probe_once<P: Probe + ?Sized>(probe: &P) -> HealthReport {
    let checked_at = Utc::now();
    let started = Instant::now();

    let status = match AssertUnwindSafe(probe.probe()).catch_unwind().await {
        Ok(Ok(())) => HealthStatus::Reachable,
        Ok(Err(err)) => HealthStatus::Unreachable {
            detail: err.to_string(),
        },
        Err(panic) => HealthStatus::Unreachable {
            detail: format!("probe panicked: {}", panic_message(panic.as_ref())),
        },
    };

    HealthReport {
        status,
        checked_at,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Probe every `period` until `cancel` fires. The first probe happens one
/// full period after the call.
pub async fn run<P, S>(probe: P, period: Duration, sink: S, cancel: CancellationToken)
where
    P: Probe,
    S: HealthSink,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let report = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            report = probe_once(&probe) => report,
        };
        sink.report(&report);
    }

    debug!("health check stopped");
}

/// Handle to a spawned health check task. Dropping it stops the loop.
#[derive(Debug)]
pub struct HealthCheck {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl HealthCheck {
    /// Spawn [`run`] on the current tokio runtime.
    pub fn spawn<P, S>(probe: P, period: Duration, sink: S) -> Self
    where
        P: Probe,
        S: HealthSink,
    {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(probe, period, sink, cancel.clone()));
        debug!(period_secs = period.as_secs(), "health check started");
        Self {
            _guard: cancel.clone().drop_guard(),
            cancel,
            task,
        }
    }

    /// Token that stops the loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        let Self { cancel, task, .. } = self;
        cancel.cancel();
        if let Err(err) = task.await {
            warn!("health check task ended abnormally: {}", err);
        }
    }
}
