use crate::di::UseCases;
use route_sync_application::use_cases::ProcessDnsActivityUseCase;
use route_sync_domain::Config;
use route_sync_jobs::{DnsWatcherJob, JobRunner, JournalRetentionJob, RouteSyncJob};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub async fn watch(config: &Config, use_cases: &UseCases) -> anyhow::Result<()> {
    let Some(process) = use_cases.process_dns_activity.clone() else {
        anyhow::bail!("no DNS log source configured ([watcher] source)");
    };

    let shutdown = CancellationToken::new();
    let handles = JobRunner::new()
        .with_dns_watcher(watcher_job(config, process))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    run_until_interrupted(shutdown, handles).await;
    Ok(())
}

pub async fn daemon(config: &Config, use_cases: &UseCases) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new()
        .with_route_sync(
            RouteSyncJob::new(use_cases.full_sync.clone())
                .with_interval(Duration::from_secs(config.sync.interval_secs)),
        )
        .with_journal_retention(JournalRetentionJob::new(
            use_cases.cleanup_journal.clone(),
            config.database.journal_retention_days,
        ))
        .with_shutdown_token(shutdown.clone());

    match (&use_cases.process_dns_activity, config.watcher.enabled) {
        (Some(process), true) => {
            runner = runner.with_dns_watcher(watcher_job(config, process.clone()));
        }
        (None, true) => warn!("DNS watcher enabled without a log source; not starting it"),
        _ => info!("DNS watcher disabled"),
    }

    let handles = runner.start().await;
    run_until_interrupted(shutdown, handles).await;
    Ok(())
}

fn watcher_job(
    config: &Config,
    process: Arc<ProcessDnsActivityUseCase>,
) -> DnsWatcherJob {
    DnsWatcherJob::new(process)
        .with_interval(Duration::from_secs(config.watcher.poll_interval_secs))
}

/// Waits for Ctrl-C or SIGTERM, then lets every job finish its current cycle.
async fn run_until_interrupted(shutdown: CancellationToken, handles: Vec<JoinHandle<()>>) {
    shutdown_signal().await;
    info!("Shutdown requested, waiting for jobs to finish");
    shutdown.cancel();

    for result in futures::future::join_all(handles).await {
        if let Err(e) = result {
            error!(error = %e, "Background job terminated abnormally");
        }
    }
    info!("Shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
