use crate::{DnsWatcherJob, JournalRetentionJob, RouteSyncJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(RouteSyncJob);
impl_spawnable_job!(DnsWatcherJob);
impl_spawnable_job!(JournalRetentionJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
    handles: &mut Vec<JoinHandle<()>>,
) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        handles.push(Arc::new(job).start_job());
    }
}

pub struct JobRunner {
    route_sync: Option<RouteSyncJob>,
    dns_watcher: Option<DnsWatcherJob>,
    journal_retention: Option<JournalRetentionJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            route_sync: None,
            dns_watcher: None,
            journal_retention: None,
            shutdown: None,
        }
    }

    pub fn with_route_sync(mut self, job: RouteSyncJob) -> Self {
        self.route_sync = Some(job);
        self
    }

    pub fn with_dns_watcher(mut self, job: DnsWatcherJob) -> Self {
        self.dns_watcher = Some(job);
        self
    }

    pub fn with_journal_retention(mut self, job: JournalRetentionJob) -> Self {
        self.journal_retention = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job. The handles finish once the shutdown
    /// token is cancelled and each job has completed its current cycle.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();
        spawn_job(self.route_sync, &self.shutdown, &mut handles);
        spawn_job(self.dns_watcher, &self.shutdown, &mut handles);
        spawn_job(self.journal_retention, &self.shutdown, &mut handles);

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
