use route_sync_application::use_cases::FullSyncUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Periodic whole-fleet sync. The first run happens at startup.
pub struct RouteSyncJob {
    full_sync: Arc<FullSyncUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RouteSyncJob {
    pub fn new(full_sync: Arc<FullSyncUseCase>) -> Self {
        Self {
            full_sync,
            interval: Duration::from_secs(3600),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval.as_secs(), "Starting route sync job");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("RouteSyncJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.full_sync.execute().await {
                        Ok(report) if report.has_failures() => {
                            warn!(
                                failures = report.failures().count(),
                                "Route sync finished with failures"
                            );
                        }
                        Ok(report) => debug!(results = report.results.len(), "Route sync finished"),
                        Err(e) if e.is_connectivity() => {
                            warn!(error = %e, "Router unreachable, retrying next cycle");
                        }
                        Err(e) => error!(error = %e, "Route sync failed"),
                    }
                }
            }
        }
    }
}
