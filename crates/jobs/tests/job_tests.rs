use route_sync_application::services::{MonitoredDomains, RouteResolver, RouterLease};
use route_sync_application::use_cases::{
    CleanupObsoleteUseCase, CleanupOldJournalUseCase, FullSyncUseCase,
    GenerateDesiredRoutesUseCase, ProcessDnsActivityUseCase, PushToRouterUseCase,
    ReconcileFromRouterUseCase,
};
use route_sync_jobs::{DnsWatcherJob, JobRunner, JournalRetentionJob, RouteSyncJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{
    MockDnsLogSource, MockDomainGroupRepository, MockHostResolver, MockJournalRepository,
    MockRouteRepository, MockRouterGateway,
};

fn full_sync(groups: &MockDomainGroupRepository, router: &MockRouterGateway) -> FullSyncUseCase {
    let groups: Arc<MockDomainGroupRepository> = Arc::new(groups.clone());
    let routes = Arc::new(MockRouteRepository);
    let gateway = Arc::new(router.clone());
    let lease = Arc::new(RouterLease::disabled());
    let resolver = Arc::new(RouteResolver::new(
        Arc::new(MockHostResolver),
        vec!["1.1.1.1".to_string()],
        "Wireguard0",
        "24",
    ));

    FullSyncUseCase::new(
        groups.clone(),
        Arc::new(GenerateDesiredRoutesUseCase::new(
            groups.clone(),
            routes.clone(),
            resolver,
        )),
        Arc::new(PushToRouterUseCase::new(
            groups.clone(),
            routes.clone(),
            gateway.clone(),
            lease.clone(),
            true,
        )),
        Arc::new(CleanupObsoleteUseCase::new(
            groups.clone(),
            routes.clone(),
            gateway.clone(),
            lease,
        )),
        Arc::new(ReconcileFromRouterUseCase::new(groups, routes, gateway)),
        false,
    )
}

fn watcher(log: &MockDnsLogSource) -> ProcessDnsActivityUseCase {
    ProcessDnsActivityUseCase::new(
        Arc::new(log.clone()),
        Arc::new(MonitoredDomains::new(
            Arc::new(MockDomainGroupRepository::new()),
            "Wireguard0",
            Duration::from_secs(60),
        )),
        Arc::new(MockRouterGateway::new()),
        Arc::new(MockJournalRepository::new()),
        Arc::new(RouterLease::disabled()),
        600,
    )
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

// ============================================================================
// Tests: Route sync
// ============================================================================

#[tokio::test]
async fn test_route_sync_runs_immediately_and_stops_on_cancel() {
    let groups = MockDomainGroupRepository::new();
    let router = MockRouterGateway::new();
    let token = CancellationToken::new();

    let job = Arc::new(
        RouteSyncJob::new(Arc::new(full_sync(&groups, &router)))
            .with_interval(Duration::from_secs(3600))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    wait_for(|| router.listing_count() >= 1).await;
    token.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();

    // FullSync lists groups once; the reconcile stage lists them again.
    assert_eq!(groups.listing_count(), 2);
    assert_eq!(router.listing_count(), 1);
}

#[tokio::test]
async fn test_route_sync_survives_unreachable_router() {
    let groups = MockDomainGroupRepository::new();
    let router = MockRouterGateway::offline();
    let token = CancellationToken::new();

    let job = Arc::new(
        RouteSyncJob::new(Arc::new(full_sync(&groups, &router)))
            .with_interval(Duration::from_millis(10))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    wait_for(|| groups.listing_count() >= 6).await;
    token.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}

// ============================================================================
// Tests: DNS watcher
// ============================================================================

#[tokio::test]
async fn test_watcher_polls_until_cancelled() {
    let log = MockDnsLogSource::new();
    let token = CancellationToken::new();

    let job = Arc::new(
        DnsWatcherJob::new(Arc::new(watcher(&log)))
            .with_interval(Duration::from_millis(5))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    wait_for(|| log.fetch_count() >= 3).await;
    token.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();

    let stopped_at = log.fetch_count();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(log.fetch_count(), stopped_at);
}

#[tokio::test]
async fn test_watcher_keeps_polling_after_failed_cycle() {
    let log = MockDnsLogSource::failing_every_other_call();
    let token = CancellationToken::new();

    let job = Arc::new(
        DnsWatcherJob::new(Arc::new(watcher(&log)))
            .with_interval(Duration::from_millis(5))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    wait_for(|| log.fetch_count() >= 4).await;
    token.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_watcher_cancelled_before_start_runs_one_cycle() {
    let log = MockDnsLogSource::new();
    let token = CancellationToken::new();
    token.cancel();

    let job = Arc::new(
        DnsWatcherJob::new(Arc::new(watcher(&log)))
            .with_interval(Duration::from_secs(3600))
            .with_cancellation(token),
    );
    tokio::time::timeout(Duration::from_secs(1), job.start())
        .await
        .unwrap();

    assert_eq!(log.fetch_count(), 1);
}

// ============================================================================
// Tests: Journal retention
// ============================================================================

#[tokio::test]
async fn test_retention_cleans_with_configured_days() {
    let journal = MockJournalRepository::new();
    let token = CancellationToken::new();

    let job = Arc::new(
        JournalRetentionJob::new(
            Arc::new(CleanupOldJournalUseCase::new(Arc::new(journal.clone()))),
            14,
        )
        .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    wait_for(|| journal.cleanup_count() >= 1).await;
    token.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(journal.cleanup_count(), 1);
    assert_eq!(journal.last_retention_days(), 14);
}

// ============================================================================
// Tests: Runner
// ============================================================================

#[tokio::test]
async fn test_runner_without_jobs_spawns_nothing() {
    let handles = JobRunner::new().start().await;
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_runner_shutdown_token_stops_every_job() {
    let log = MockDnsLogSource::new();
    let journal = MockJournalRepository::new();
    let groups = MockDomainGroupRepository::new();
    let router = MockRouterGateway::new();
    let token = CancellationToken::new();

    let handles = JobRunner::new()
        .with_route_sync(RouteSyncJob::new(Arc::new(full_sync(&groups, &router))))
        .with_dns_watcher(
            DnsWatcherJob::new(Arc::new(watcher(&log))).with_interval(Duration::from_millis(5)),
        )
        .with_journal_retention(JournalRetentionJob::new(
            Arc::new(CleanupOldJournalUseCase::new(Arc::new(journal.clone()))),
            30,
        ))
        .with_shutdown_token(token.clone())
        .start()
        .await;
    assert_eq!(handles.len(), 3);

    wait_for(|| {
        log.fetch_count() >= 1 && journal.cleanup_count() >= 1 && router.listing_count() >= 1
    })
    .await;
    token.cancel();

    for handle in handles {
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
