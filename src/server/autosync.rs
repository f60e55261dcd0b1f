use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;

/// Background rendition of the scheduled sync trigger: starts an ingestion
/// job on a fixed cadence. Job failures are logged and never stop the task.
pub fn spawn(state: Arc<AppState>) -> Option<JoinHandle<()>> {
    let minutes = state.config.ingestion.auto_sync_interval_minutes;
    if minutes == 0 {
        return None;
    }

    tracing::info!(interval_minutes = minutes, "scheduled ingestion enabled");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately; skip it so the
        // first job runs one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match state.kb.start_ingestion_job().await {
                Ok(response) => tracing::info!(
                    job_id = %response.ingestion_job.ingestion_job_id,
                    status = %response.ingestion_job.status,
                    "scheduled ingestion job started"
                ),
                Err(err) => tracing::error!("scheduled ingestion failed: {}", err),
            }
        }
    }))
}
