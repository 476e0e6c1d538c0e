use route_sync_application::use_cases::CleanupOldJournalUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct JournalRetentionJob {
    cleanup: Arc<CleanupOldJournalUseCase>,
    retention_days: u32,
    interval: Duration,
    shutdown: CancellationToken,
}

impl JournalRetentionJob {
    pub fn new(cleanup: Arc<CleanupOldJournalUseCase>, retention_days: u32) -> Self {
        Self {
            cleanup,
            retention_days,
            interval: Duration::from_secs(86400),
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
        info!(
            retention_days = self.retention_days,
            "Starting journal retention job"
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("JournalRetentionJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.cleanup.execute(self.retention_days).await {
                        Ok(deleted) => info!(deleted, "Journal retention cleanup completed"),
                        Err(e) => error!(error = %e, "Journal retention cleanup failed"),
                    }
                }
            }
        }
    }
}
