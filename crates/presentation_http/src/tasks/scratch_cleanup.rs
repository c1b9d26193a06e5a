//! Scratch directory retention task
//!
//! Periodically deletes synthesized audio older than the retention period.

use std::sync::Arc;
use std::time::Duration;

use application::SpeechService;
use tracing::{debug, error, info};

/// Spawn a background task that evicts expired synthesized audio.
///
/// The first sweep runs one `interval` after startup. Returns a
/// `JoinHandle` to abort the task on shutdown.
pub fn spawn_scratch_cleanup_task(
    speech_service: Arc<SpeechService>,
    retention: Duration,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        retention_secs = retention.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting scratch cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match speech_service.sweep_expired(retention).await {
                Ok(0) => debug!("No expired audio to clean up"),
                Ok(removed) => debug!(removed, "Scratch sweep finished"),
                Err(e) => error!(error = %e, "Failed to sweep scratch directory"),
            }
        }
    })
}
