// Refresh loop - drives pipeline cycles on a fixed timer
use crate::application::pipeline_service::{CycleOutcome, PipelineService};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);

/// Run a cycle immediately and then once per `period` until `shutdown`
/// flips to true or its sender is dropped. Each cycle runs on its own task so
/// a slow fetch cannot delay the timer; overlap is refused by the service.
pub async fn run_refresh_loop(
    service: PipelineService,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(period_ms = period.as_millis() as u64, "refresh loop started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let service = service.clone();
                tokio::spawn(async move {
                    report(service.run_cycle().await);
                });
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::info!("refresh loop stopped");
}

fn report(outcome: CycleOutcome) {
    match outcome {
        CycleOutcome::Completed(reports) => {
            for r in reports {
                tracing::info!(
                    pipeline = %r.pipeline,
                    rows = r.rows,
                    skipped = r.skipped,
                    last_updated = %r.last_updated,
                    "chart refreshed"
                );
            }
        }
        CycleOutcome::Busy => {
            tracing::warn!("previous refresh cycle still running, skipping this one");
        }
        CycleOutcome::FetchFailed(e) => {
            tracing::error!(error = %e, "error fetching station CSV, keeping current charts");
        }
    }
}
