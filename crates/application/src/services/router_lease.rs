use crate::ports::SyncLeaseRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

const LEASE_NAME: &str = "router";
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Advisory lease around router mutations shared through the database.
///
/// Never blocks forever: when the lease cannot be taken within the wait
/// window the guarded work runs anyway.
pub struct RouterLease {
    repo: Option<Arc<dyn SyncLeaseRepository>>,
    holder: String,
    ttl_secs: u64,
    wait: Duration,
}

impl RouterLease {
    pub fn new(repo: Arc<dyn SyncLeaseRepository>, ttl_secs: u64, wait_secs: u64) -> Self {
        Self {
            repo: Some(repo),
            holder: default_holder(),
            ttl_secs,
            wait: Duration::from_secs(wait_secs),
        }
    }

    pub fn disabled() -> Self {
        Self {
            repo: None,
            holder: default_holder(),
            ttl_secs: 0,
            wait: Duration::ZERO,
        }
    }

    pub async fn run<F, T>(&self, work: F) -> T
    where
        F: Future<Output = T>,
    {
        let Some(repo) = &self.repo else {
            return work.await;
        };

        let acquired = self.acquire(repo.as_ref()).await;
        let output = work.await;

        if acquired {
            if let Err(e) = repo.release(LEASE_NAME, &self.holder).await {
                warn!(error = %e, holder = %self.holder, "Failed to release router lease");
            }
        }
        output
    }

    async fn acquire(&self, repo: &dyn SyncLeaseRepository) -> bool {
        let deadline = Instant::now() + self.wait;
        loop {
            match repo.try_acquire(LEASE_NAME, &self.holder, self.ttl_secs).await {
                Ok(true) => {
                    debug!(holder = %self.holder, "Router lease acquired");
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Router lease unavailable, continuing without it");
                    return false;
                }
            }

            if Instant::now() >= deadline {
                warn!(
                    holder = %self.holder,
                    wait_secs = self.wait.as_secs(),
                    "Router lease still held elsewhere, continuing without it"
                );
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

fn default_holder() -> String {
    format!(
        "pid-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_subsec_nanos()
    )
}
