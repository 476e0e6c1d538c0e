use super::{Repositories, RouterServices};
use route_sync_application::ports::DnsLogSource;
use route_sync_application::services::{MonitoredDomains, RouteResolver, RouterLease};
use route_sync_application::use_cases::{
    CleanupObsoleteUseCase, CleanupOldJournalUseCase, FullSyncUseCase,
    GenerateDesiredRoutesUseCase, GetRecentJournalUseCase, ListRouterRoutesUseCase,
    ProcessDnsActivityUseCase, PushToRouterUseCase, ReconcileFromRouterUseCase,
};
use route_sync_domain::config::DnsLogSourceConfig;
use route_sync_domain::{Config, DomainError};
use route_sync_infrastructure::dns::UdpHostResolver;
use route_sync_infrastructure::dns_log::{FileDnsLogSource, HttpDnsLogSource};
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub generate: Arc<GenerateDesiredRoutesUseCase>,
    pub push: Arc<PushToRouterUseCase>,
    pub cleanup: Arc<CleanupObsoleteUseCase>,
    pub reconcile: Arc<ReconcileFromRouterUseCase>,
    pub full_sync: Arc<FullSyncUseCase>,
    pub list_routes: Arc<ListRouterRoutesUseCase>,
    pub get_journal: Arc<GetRecentJournalUseCase>,
    pub cleanup_journal: Arc<CleanupOldJournalUseCase>,
    /// Absent when no DNS log source is configured.
    pub process_dns_activity: Option<Arc<ProcessDnsActivityUseCase>>,
}

impl UseCases {
    pub fn new(
        config: &Config,
        repos: &Repositories,
        router: &RouterServices,
    ) -> Result<Self, DomainError> {
        let routing = &config.routing;

        let lease = Arc::new(if config.sync.use_lease {
            RouterLease::new(
                repos.sync_lease.clone(),
                config.sync.lease_ttl_secs,
                config.sync.lease_wait_secs,
            )
        } else {
            RouterLease::disabled()
        });

        let resolver = Arc::new(RouteResolver::new(
            Arc::new(UdpHostResolver::new(Duration::from_secs(
                routing.dns_timeout_secs,
            ))),
            routing.dns_servers.clone(),
            routing.default_interface.clone(),
            routing.default_mask.clone(),
        ));

        let generate = Arc::new(GenerateDesiredRoutesUseCase::new(
            repos.groups.clone(),
            repos.routes.clone(),
            resolver,
        ));
        let push = Arc::new(PushToRouterUseCase::new(
            repos.groups.clone(),
            repos.routes.clone(),
            router.gateway.clone(),
            lease.clone(),
            routing.delete_obsolete,
        ));
        let cleanup = Arc::new(CleanupObsoleteUseCase::new(
            repos.groups.clone(),
            repos.routes.clone(),
            router.gateway.clone(),
            lease.clone(),
        ));
        let reconcile = Arc::new(ReconcileFromRouterUseCase::new(
            repos.groups.clone(),
            repos.routes.clone(),
            router.gateway.clone(),
        ));
        let full_sync = Arc::new(FullSyncUseCase::new(
            repos.groups.clone(),
            generate.clone(),
            push.clone(),
            cleanup.clone(),
            reconcile.clone(),
            routing.minimize,
        ));

        let process_dns_activity = match Self::log_source(config)? {
            Some(source) => {
                let monitored = Arc::new(MonitoredDomains::new(
                    repos.groups.clone(),
                    routing.default_interface.clone(),
                    Duration::from_secs(config.watcher.domains_cache_ttl_secs),
                ));
                Some(Arc::new(ProcessDnsActivityUseCase::new(
                    source,
                    monitored,
                    router.gateway.clone(),
                    repos.journal.clone(),
                    lease,
                    config.watcher.initial_lookback_secs,
                )))
            }
            None => None,
        };

        Ok(Self {
            generate,
            push,
            cleanup,
            reconcile,
            full_sync,
            list_routes: Arc::new(ListRouterRoutesUseCase::new(router.gateway.clone())),
            get_journal: Arc::new(GetRecentJournalUseCase::new(repos.journal.clone())),
            cleanup_journal: Arc::new(CleanupOldJournalUseCase::new(repos.journal.clone())),
            process_dns_activity,
        })
    }

    fn log_source(config: &Config) -> Result<Option<Arc<dyn DnsLogSource>>, DomainError> {
        let timeout = Duration::from_secs(config.router.request_timeout_secs);
        Ok(match &config.watcher.source {
            Some(DnsLogSourceConfig::Url(url)) => {
                Some(Arc::new(HttpDnsLogSource::new(url, timeout)?) as Arc<dyn DnsLogSource>)
            }
            Some(DnsLogSourceConfig::File(path)) => Some(Arc::new(FileDnsLogSource::new(path))),
            None => None,
        })
    }
}
