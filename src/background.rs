use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Hourly maintenance loop. Refresh tokens expire after seven days; rows
/// for tokens that were never presented again would otherwise accumulate
/// forever.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background maintenance worker...");

    loop {
        let span = info_span!("refresh_token_purge");

        async {
            match state.auth_repo.delete_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => info!("Purged {} expired refresh tokens", purged),
                Err(e) => error!("Failed to purge expired refresh tokens: {:?}", e),
            }
        }
        .instrument(span)
        .await;

        sleep(PURGE_INTERVAL).await;
    }
}
