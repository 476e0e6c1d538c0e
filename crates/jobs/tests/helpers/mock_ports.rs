#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_application::ports::{
    DnsLogSource, DomainGroupRepository, HostResolver, JournalRepository, RouteRepository,
    RouterGateway,
};
use route_sync_domain::{
    BatchOutcome, DnsLogEntry, DomainEntry, DomainError, DomainGroup, JournalEntry, Route,
    RouteCandidate, RouterInterface, RouterRoute,
};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Log source that counts fetches and can fail every other call.
#[derive(Clone, Default)]
pub struct MockDnsLogSource {
    fetches: Arc<AtomicU64>,
    fail_odd: Arc<AtomicBool>,
}

impl MockDnsLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_every_other_call() -> Self {
        let source = Self::default();
        source.fail_odd.store(true, Ordering::SeqCst);
        source
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsLogSource for MockDnsLogSource {
    async fn fetch_since(&self, _since: DateTime<Utc>) -> Result<Vec<DnsLogEntry>, DomainError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_odd.load(Ordering::SeqCst) && n % 2 == 0 {
            return Err(DomainError::Network {
                host: "adguard.local".to_string(),
                reason: "connection reset".to_string(),
            });
        }
        Ok(Vec::new())
    }
}

#[derive(Clone, Default)]
pub struct MockJournalRepository {
    cleanups: Arc<AtomicU64>,
    last_days: Arc<AtomicU64>,
}

impl MockJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cleanup_count(&self) -> u64 {
        self.cleanups.load(Ordering::SeqCst)
    }

    pub fn last_retention_days(&self) -> u64 {
        self.last_days.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JournalRepository for MockJournalRepository {
    async fn record(&self, _entry: &JournalEntry) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_recent(&self, _limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        Ok(Vec::new())
    }

    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        self.last_days.store(u64::from(days), Ordering::SeqCst);
        Ok(3)
    }
}

/// Group repository with no groups; counts full listings.
#[derive(Clone, Default)]
pub struct MockDomainGroupRepository {
    listings: Arc<AtomicU64>,
}

impl MockDomainGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing_count(&self) -> u64 {
        self.listings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainGroupRepository for MockDomainGroupRepository {
    async fn get_all(&self) -> Result<Vec<DomainGroup>, DomainError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn get_by_name(&self, _name: &str) -> Result<Option<DomainGroup>, DomainError> {
        Ok(None)
    }

    async fn get_domains(&self, _group_id: i64) -> Result<Vec<DomainEntry>, DomainError> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Default)]
pub struct MockRouteRepository;

#[async_trait]
impl RouteRepository for MockRouteRepository {
    async fn get_by_group(&self, _group_id: i64) -> Result<Vec<Route>, DomainError> {
        Ok(Vec::new())
    }

    async fn get_all(&self) -> Result<Vec<Route>, DomainError> {
        Ok(Vec::new())
    }

    async fn create(&self, route: &Route) -> Result<Route, DomainError> {
        Ok(route.clone())
    }

    async fn delete(&self, _id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    async fn mark_synced(
        &self,
        _ids: &[i64],
        _synced_at: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[derive(Clone, Default)]
pub struct MockHostResolver;

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn lookup_a(&self, _server: &str, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        Err(DomainError::Resolution {
            domain: domain.to_string(),
        })
    }
}

/// Router with an empty route table; unreachable when built with `offline`.
#[derive(Clone, Default)]
pub struct MockRouterGateway {
    offline: Arc<AtomicBool>,
    listings: Arc<AtomicU64>,
}

impl MockRouterGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        let gateway = Self::default();
        gateway.offline.store(true, Ordering::SeqCst);
        gateway
    }

    pub fn listing_count(&self) -> u64 {
        self.listings.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DomainError::CannotConnect {
                host: "192.168.1.1".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RouterGateway for MockRouterGateway {
    async fn list_interfaces(&self) -> Result<Vec<RouterInterface>, DomainError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_routes(&self) -> Result<Vec<RouterRoute>, DomainError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Vec::new())
    }

    async fn add_routes(&self, _routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError> {
        self.check()?;
        Ok(BatchOutcome::default())
    }

    async fn delete_routes(
        &self,
        _routes: &[RouteCandidate],
    ) -> Result<BatchOutcome, DomainError> {
        self.check()?;
        Ok(BatchOutcome::default())
    }
}
