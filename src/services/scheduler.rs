use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::services::sync_service::SyncService;

/// Periodic cache refresh.
/// Re-pulls the full todo list so edits made elsewhere eventually land.
pub struct RefreshScheduler {
    service: Arc<SyncService>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(service: Arc<SyncService>, interval_secs: u64) -> Self {
        Self {
            service,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Refreshes in an endless loop; a failed pull is logged and the
    /// loop keeps going.
    pub async fn start(self) {
        info!("Starting refresh scheduler (interval: {:?})", self.interval);

        loop {
            tokio::time::sleep(self.interval).await;

            match self.service.load_all().await {
                Ok(todos) => {
                    info!("Refresh completed - {} todos in cache", todos.len());
                }
                Err(e) => {
                    warn!("Refresh failed: {:?}", e);
                }
            }
        }
    }
}
