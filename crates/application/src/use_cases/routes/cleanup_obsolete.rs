use crate::ports::{DomainGroupRepository, RouteRepository, RouterGateway};
use crate::services::{observed_candidate, ObservedTable, RouterLease};
use route_sync_domain::{DomainError, DomainGroup, RouteKey, SyncReport, SyncStage};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Removes routes of groups that no longer monitor any domain.
///
/// Only routes tagged for the group, or uncommented routes matching one of
/// its stored rows, are deleted from the router. Router routes go first; stored rows are only dropped once the router
/// confirmed the delete so a failed run is retried next time.
pub struct CleanupObsoleteUseCase {
    group_repo: Arc<dyn DomainGroupRepository>,
    route_repo: Arc<dyn RouteRepository>,
    gateway: Arc<dyn RouterGateway>,
    lease: Arc<RouterLease>,
}

impl CleanupObsoleteUseCase {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        route_repo: Arc<dyn RouteRepository>,
        gateway: Arc<dyn RouterGateway>,
        lease: Arc<RouterLease>,
    ) -> Self {
        Self {
            group_repo,
            route_repo,
            gateway,
            lease,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<SyncReport, DomainError> {
        self.lease.run(self.cleanup()).await
    }

    async fn cleanup(&self) -> Result<SyncReport, DomainError> {
        let mut report = SyncReport::new();
        let mut observed: Option<ObservedTable> = None;

        for group in self.group_repo.get_all().await? {
            let Some(group_id) = group.id else {
                continue;
            };

            let domains = match self.group_repo.get_domains(group_id).await {
                Ok(domains) => domains,
                Err(e) => {
                    report.record_err(&group.name, SyncStage::Cleanup, e.to_string());
                    continue;
                }
            };
            if !domains.is_empty() {
                continue;
            }

            if observed.is_none() {
                match ObservedTable::fetch(self.gateway.as_ref()).await {
                    Ok(table) => observed = Some(table),
                    Err(e) => {
                        report.record_err(&group.name, SyncStage::Cleanup, e.to_string());
                        return Ok(report);
                    }
                }
            }
            let Some(table) = observed.as_ref() else {
                continue;
            };

            match self.cleanup_group(&group, group_id, table).await {
                Ok(Some((router_deleted, stored_deleted))) => {
                    report.record_ok(
                        &group.name,
                        SyncStage::Cleanup,
                        format!(
                            "{} router route(s) and {} stored route(s) removed",
                            router_deleted, stored_deleted
                        ),
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(group = %group.name, error = %e, "Obsolete routes kept for retry");
                    report.record_err(&group.name, SyncStage::Cleanup, e.to_string());
                }
            }
        }

        Ok(report)
    }

    async fn cleanup_group(
        &self,
        group: &DomainGroup,
        group_id: i64,
        observed: &ObservedTable,
    ) -> Result<Option<(usize, usize)>, DomainError> {
        let stored = self.route_repo.get_by_group(group_id).await?;
        let stored_keys: HashSet<RouteKey> = stored
            .iter()
            .map(|r| observed.normalize(&r.key()))
            .collect();

        let mut queued = HashSet::new();
        let to_delete: Vec<_> = observed
            .routes
            .iter()
            .filter(|r| {
                r.key(&observed.aliases).is_some_and(|key| {
                    // Untagged routes only count when they carry no comment at all.
                    let owned = r.is_tagged_for(&group.name)
                        || (r.is_uncommented() && stored_keys.contains(&key));
                    owned && queued.insert(key)
                })
            })
            .filter_map(observed_candidate)
            .collect();

        if stored.is_empty() && to_delete.is_empty() {
            return Ok(None);
        }

        if !to_delete.is_empty() {
            self.gateway.delete_routes(&to_delete).await?.into_result()?;
        }

        for route in &stored {
            if let Some(id) = route.id {
                self.route_repo.delete(id).await?;
            }
        }

        info!(
            group = %group.name,
            router_deleted = to_delete.len(),
            stored_deleted = stored.len(),
            "Obsolete routes removed"
        );
        Ok(Some((to_delete.len(), stored.len())))
    }
}
