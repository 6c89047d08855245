use std::time::Duration;

use tracing::{error, info};

use scorer_application::commands::recompute_batch;
use scorer_application::AppState;

/// Periodically rescores every known wallet. Returns immediately when the
/// sweep is disabled.
pub async fn schedule_recompute(state: AppState) {
    if !state.config.recompute_enabled {
        info!("scheduled recompute disabled");
        return;
    }
    let interval = Duration::from_secs(state.config.recompute_interval_minutes.max(1) * 60);
    loop {
        tokio::time::sleep(interval).await;

        match recompute_batch(&state, Vec::new()).await {
            Ok(outcome) => info!(
                run_id = %outcome.run_id,
                scored = outcome.scored,
                failed = outcome.failures.len(),
                "scheduled recompute finished"
            ),
            Err(err) => error!("scheduled recompute failed: {}", err),
        }
    }
}
