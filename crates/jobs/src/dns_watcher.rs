use route_sync_application::use_cases::ProcessDnsActivityUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Polls the DNS query log until cancelled.
///
/// Cancellation is observed between cycles; a running cycle always
/// finishes. Cycle errors are logged and the loop carries on.
pub struct DnsWatcherJob {
    process: Arc<ProcessDnsActivityUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl DnsWatcherJob {
    pub fn new(process: Arc<ProcessDnsActivityUseCase>) -> Self {
        Self {
            process,
            interval: Duration::from_secs(10),
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
        info!(interval_ms = self.interval.as_millis() as u64, "Starting DNS watcher");

        loop {
            match self.process.execute().await {
                Ok(outcome) => debug!(entries = outcome.entries, "DNS watcher cycle finished"),
                Err(e) => error!(error = %e, "DNS watcher cycle failed"),
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("DnsWatcherJob: shutting down");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
