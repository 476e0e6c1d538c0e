#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_application::ports::{
    DnsLogSource, DomainGroupRepository, HostResolver, JournalRepository, RouteRepository,
    RouterGateway, SyncLeaseRepository,
};
use route_sync_domain::{
    BatchOutcome, DnsLogEntry, DomainEntry, DomainError, DomainGroup, JournalEntry, Route,
    RouteCandidate, RouteStatus, RouterInterface, RouterRoute,
};
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Group / domain configuration
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDomainGroupRepository {
    groups: Arc<RwLock<Vec<DomainGroup>>>,
    domains: Arc<RwLock<HashMap<i64, Vec<DomainEntry>>>>,
}

impl MockDomainGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_group(&self, id: i64, name: &str, mask: Option<&str>, interfaces: Option<&str>) {
        self.groups.write().await.push(DomainGroup::new(
            Some(id),
            Arc::from(name),
            mask.map(Arc::from),
            interfaces.map(Arc::from),
        ));
    }

    pub async fn set_domains(&self, group_id: i64, domains: &[&str]) {
        let entries = domains
            .iter()
            .enumerate()
            .map(|(i, d)| DomainEntry::new(Some(i as i64 + 1), group_id, Arc::from(*d)))
            .collect();
        self.domains.write().await.insert(group_id, entries);
    }

    pub async fn group(&self, name: &str) -> DomainGroup {
        self.groups
            .read()
            .await
            .iter()
            .find(|g| g.name.as_ref() == name)
            .cloned()
            .expect("group seeded")
    }
}

#[async_trait]
impl DomainGroupRepository for MockDomainGroupRepository {
    async fn get_all(&self) -> Result<Vec<DomainGroup>, DomainError> {
        Ok(self.groups.read().await.clone())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DomainGroup>, DomainError> {
        Ok(self
            .groups
            .read()
            .await
            .iter()
            .find(|g| g.name.as_ref() == name)
            .cloned())
    }

    async fn get_domains(&self, group_id: i64) -> Result<Vec<DomainEntry>, DomainError> {
        Ok(self
            .domains
            .read()
            .await
            .get(&group_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Desired routes
// ============================================================================

#[derive(Clone)]
pub struct MockRouteRepository {
    routes: Arc<RwLock<Vec<Route>>>,
    next_id: Arc<AtomicU64>,
    creates: Arc<AtomicU64>,
    deletes: Arc<AtomicU64>,
}

impl MockRouteRepository {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            creates: Arc::new(AtomicU64::new(0)),
            deletes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn seed(&self, mut route: Route) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        route.id = Some(id);
        self.routes.write().await.push(route);
        id
    }

    pub async fn all(&self) -> Vec<Route> {
        self.routes.read().await.clone()
    }

    pub fn create_count(&self) -> u64 {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> u64 {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.creates.store(0, Ordering::SeqCst);
        self.deletes.store(0, Ordering::SeqCst);
    }
}

impl Default for MockRouteRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteRepository for MockRouteRepository {
    async fn get_by_group(&self, group_id: i64) -> Result<Vec<Route>, DomainError> {
        Ok(self
            .routes
            .read()
            .await
            .iter()
            .filter(|r| r.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Route>, DomainError> {
        Ok(self.routes.read().await.clone())
    }

    async fn create(&self, route: &Route) -> Result<Route, DomainError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut created = route.clone();
        created.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) as i64);
        self.routes.write().await.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.routes.write().await.retain(|r| r.id != Some(id));
        Ok(())
    }

    async fn mark_synced(&self, ids: &[i64], synced_at: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut updated = 0;
        for route in self.routes.write().await.iter_mut() {
            if route.id.is_some_and(|id| ids.contains(&id)) {
                route.synced_to_router = true;
                route.synced_at = Some(synced_at);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

// ============================================================================
// Journal
// ============================================================================

#[derive(Clone, Default)]
pub struct MockJournalRepository {
    entries: Arc<RwLock<Vec<JournalEntry>>>,
}

impl MockJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<JournalEntry> {
        self.entries.read().await.clone()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl JournalRepository for MockJournalRepository {
    async fn record(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn get_recent(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete_older_than(&self, _days: u32) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let removed = entries.len() as u64;
        entries.clear();
        Ok(removed)
    }
}

// ============================================================================
// Lease
// ============================================================================

#[derive(Clone, Default)]
pub struct MockSyncLeaseRepository {
    holder: Arc<RwLock<Option<String>>>,
    releases: Arc<AtomicU64>,
}

impl MockSyncLeaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn hold(&self, holder: &str) {
        *self.holder.write().await = Some(holder.to_string());
    }

    pub async fn current_holder(&self) -> Option<String> {
        self.holder.read().await.clone()
    }

    pub fn release_count(&self) -> u64 {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SyncLeaseRepository for MockSyncLeaseRepository {
    async fn try_acquire(&self, _name: &str, holder: &str, _ttl_secs: u64) -> Result<bool, DomainError> {
        let mut current = self.holder.write().await;
        match current.as_deref() {
            Some(existing) if existing != holder => Ok(false),
            _ => {
                *current = Some(holder.to_string());
                Ok(true)
            }
        }
    }

    async fn release(&self, _name: &str, holder: &str) -> Result<(), DomainError> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        let mut current = self.holder.write().await;
        if current.as_deref() == Some(holder) {
            *current = None;
        }
        Ok(())
    }
}

// ============================================================================
// Router
// ============================================================================

/// In-memory router table. Adds append, deletes remove by destination and
/// interface; networks listed in `reject` come back as per-route errors.
#[derive(Clone, Default)]
pub struct MockRouterGateway {
    interfaces: Arc<RwLock<Vec<RouterInterface>>>,
    routes: Arc<RwLock<Vec<RouterRoute>>>,
    rejected: Arc<RwLock<HashSet<Ipv4Addr>>>,
    should_fail: Arc<RwLock<bool>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockRouterGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_interface(&self, id: &str, description: Option<&str>) {
        self.interfaces.write().await.push(RouterInterface {
            id: id.to_string(),
            description: description.map(str::to_string),
        });
    }

    pub async fn seed_route(&self, network: [u8; 4], mask: [u8; 4], interface: &str, comment: Option<&str>) {
        self.routes.write().await.push(RouterRoute {
            network: Some(Ipv4Addr::from(network)),
            host: None,
            mask: Some(Ipv4Addr::from(mask)),
            interface: interface.to_string(),
            gateway: None,
            comment: comment.map(str::to_string),
            auto: true,
            reject: false,
        });
    }

    pub async fn reject(&self, network: Ipv4Addr) {
        self.rejected.write().await.insert(network);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn routes(&self) -> Vec<RouterRoute> {
        self.routes.read().await.clone()
    }

    /// "list_routes", "add:N", "delete:N" in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn mutation_calls(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.starts_with("add") || c.starts_with("delete"))
            .cloned()
            .collect()
    }

    async fn check_reachable(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::CannotConnect {
                host: "mock-router".to_string(),
            });
        }
        Ok(())
    }

    fn status(ok: bool, message: &str) -> RouteStatus {
        RouteStatus {
            ok,
            message: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl RouterGateway for MockRouterGateway {
    async fn list_interfaces(&self) -> Result<Vec<RouterInterface>, DomainError> {
        self.check_reachable().await?;
        Ok(self.interfaces.read().await.clone())
    }

    async fn list_routes(&self) -> Result<Vec<RouterRoute>, DomainError> {
        self.check_reachable().await?;
        self.calls.write().await.push("list_routes".to_string());
        Ok(self.routes.read().await.clone())
    }

    async fn add_routes(&self, routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError> {
        self.check_reachable().await?;
        self.calls.write().await.push(format!("add:{}", routes.len()));

        let rejected = self.rejected.read().await.clone();
        let mut table = self.routes.write().await;
        let mut statuses = Vec::new();
        for candidate in routes {
            if rejected.contains(&candidate.network) {
                statuses.push(Self::status(
                    false,
                    &format!("unable to add route to {}", candidate.network),
                ));
                continue;
            }
            table.push(RouterRoute {
                network: Some(candidate.network),
                host: None,
                mask: Some(candidate.mask),
                interface: candidate.interface.clone(),
                gateway: None,
                comment: Some(candidate.comment.clone()),
                auto: true,
                reject: false,
            });
            statuses.push(Self::status(true, "added"));
        }
        Ok(BatchOutcome::new(statuses))
    }

    async fn delete_routes(&self, routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError> {
        self.check_reachable().await?;
        self.calls.write().await.push(format!("delete:{}", routes.len()));

        let rejected = self.rejected.read().await.clone();
        let mut table = self.routes.write().await;
        let mut statuses = Vec::new();
        for candidate in routes {
            if rejected.contains(&candidate.network) {
                statuses.push(Self::status(
                    false,
                    &format!("unable to delete route to {}", candidate.network),
                ));
                continue;
            }
            table.retain(|r| {
                r.destination() != Some((candidate.network, candidate.mask))
                    || r.interface != candidate.interface
            });
            statuses.push(Self::status(true, "deleted"));
        }
        Ok(BatchOutcome::new(statuses))
    }
}

// ============================================================================
// DNS
// ============================================================================

/// Per-server answers; a server with no entry fails the lookup.
#[derive(Clone, Default)]
pub struct MockHostResolver {
    answers: Arc<RwLock<HashMap<(String, String), Vec<Ipv4Addr>>>>,
    queried: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_answer(&self, server: &str, domain: &str, addresses: &[&str]) {
        self.answers.write().await.insert(
            (server.to_string(), domain.to_string()),
            addresses.iter().map(|a| a.parse().unwrap()).collect(),
        );
    }

    pub async fn queried(&self) -> Vec<(String, String)> {
        self.queried.read().await.clone()
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn lookup_a(&self, server: &str, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.queried
            .write()
            .await
            .push((server.to_string(), domain.to_string()));
        self.answers
            .read()
            .await
            .get(&(server.to_string(), domain.to_string()))
            .cloned()
            .ok_or_else(|| DomainError::DnsQuery(format!("SERVFAIL from {}", server)))
    }
}

/// Queue of fetch results, one per call; empty queue returns no entries.
#[derive(Clone, Default)]
pub struct MockDnsLogSource {
    results: Arc<RwLock<Vec<Result<Vec<DnsLogEntry>, DomainError>>>>,
    since: Arc<RwLock<Vec<DateTime<Utc>>>>,
}

impl MockDnsLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_entries(&self, entries: Vec<DnsLogEntry>) {
        self.results.write().await.push(Ok(entries));
    }

    pub async fn push_failure(&self) {
        self.results
            .write()
            .await
            .push(Err(DomainError::InvalidData("log source unavailable".to_string())));
    }

    pub async fn requested_since(&self) -> Vec<DateTime<Utc>> {
        self.since.read().await.clone()
    }
}

#[async_trait]
impl DnsLogSource for MockDnsLogSource {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<DnsLogEntry>, DomainError> {
        self.since.write().await.push(since);
        let mut results = self.results.write().await;
        if results.is_empty() {
            Ok(Vec::new())
        } else {
            results.remove(0)
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn mask(prefix: u8) -> Ipv4Addr {
    route_sync_domain::netmask::prefix_to_mask(prefix).unwrap()
}

pub fn desired_route(group_id: i64, network: &str, prefix: u8, interface: &str, comment: &str) -> Route {
    Route {
        id: None,
        group_id,
        network: network.parse().unwrap(),
        mask: mask(prefix),
        interface: interface.to_string(),
        comment: comment.to_string(),
        synced_to_router: false,
        synced_at: None,
    }
}
