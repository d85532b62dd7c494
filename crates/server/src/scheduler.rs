//! Background sync scheduler.
//!
//! A single-purpose task that fires the three sync operations - products,
//! then customers, then orders - on a fixed wall-clock interval, through
//! the same `SyncService` entry points the HTTP triggers use. It only
//! logs outcomes; a failed run is not retried before the next tick, and
//! nothing stops a manual trigger from running at the same time
//! (reconciliation is idempotent, so overlap converges).

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use storepulse_core::EntityKind;

use crate::services::SyncService;
use crate::state::AppState;

/// Handle to the running scheduler task.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the scheduler and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the scheduler task.
///
/// The first sync fires one full interval after startup, not immediately;
/// an operator who wants data right away uses the manual triggers.
#[must_use]
pub fn spawn(state: AppState) -> SchedulerHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let period = state.config().sync_interval();

    let task = tokio::spawn(async move {
        tracing::info!(period_secs = period.as_secs(), "sync scheduler started");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval's first tick completes immediately; swallow it
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => run_scheduled_sync(&state).await,
                _ = shutdown_rx.changed() => {
                    tracing::info!("sync scheduler stopped");
                    break;
                }
            }
        }
    });

    SchedulerHandle { shutdown, task }
}

/// One scheduled pass over all entity kinds.
///
/// Each kind's failure is logged and the pass moves on - the kinds are
/// independent operations and a dead upstream will fail all three with
/// the same error anyway.
async fn run_scheduled_sync(state: &AppState) {
    tracing::info!("scheduled sync starting");
    let service = SyncService::new(state.pool(), state.shopify());

    for kind in EntityKind::ALL {
        match service.sync(kind).await {
            Ok(report) => tracing::info!(
                kind = %kind,
                total_fetched = report.total_fetched,
                saved_or_updated = report.saved_or_updated,
                "scheduled sync finished"
            ),
            Err(error) => tracing::error!(
                kind = %kind,
                error = %error,
                "scheduled sync failed"
            ),
        }
    }
}
