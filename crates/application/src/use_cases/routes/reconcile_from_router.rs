use crate::ports::{DomainGroupRepository, RouteRepository, RouterGateway};
use crate::services::ObservedTable;
use chrono::Utc;
use route_sync_domain::{DomainError, Route, RouteKey, SyncReport, SyncStage};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Backfills storage with auto-tagged router routes that have no stored
/// row, as already synced. Recovers from routes created out of band or by
/// a run that died between the RPC and the database write.
pub struct ReconcileFromRouterUseCase {
    group_repo: Arc<dyn DomainGroupRepository>,
    route_repo: Arc<dyn RouteRepository>,
    gateway: Arc<dyn RouterGateway>,
}

impl ReconcileFromRouterUseCase {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        route_repo: Arc<dyn RouteRepository>,
        gateway: Arc<dyn RouterGateway>,
    ) -> Self {
        Self {
            group_repo,
            route_repo,
            gateway,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<SyncReport, DomainError> {
        let observed = ObservedTable::fetch(self.gateway.as_ref()).await?;

        let group_ids: HashMap<String, i64> = self
            .group_repo
            .get_all()
            .await?
            .into_iter()
            .filter_map(|g| g.id.map(|id| (g.name.to_string(), id)))
            .collect();

        let mut known: HashMap<i64, HashSet<RouteKey>> = HashMap::new();
        for route in self.route_repo.get_all().await? {
            known
                .entry(route.group_id)
                .or_default()
                .insert(observed.normalize(&route.key()));
        }

        let mut backfilled: HashMap<String, usize> = HashMap::new();
        for router_route in &observed.routes {
            let Some(group) = router_route.group() else {
                continue;
            };
            let Some(&group_id) = group_ids.get(group) else {
                debug!(group, "Tagged route for unknown group left alone");
                continue;
            };
            let Some(key) = router_route.key(&observed.aliases) else {
                continue;
            };
            if !known.entry(group_id).or_default().insert(key.clone()) {
                continue;
            }

            let route = Route {
                id: None,
                group_id,
                network: key.network,
                mask: key.mask,
                interface: key.interface,
                comment: router_route.comment.clone().unwrap_or_default(),
                synced_to_router: true,
                synced_at: Some(Utc::now()),
            };
            self.route_repo.create(&route).await?;
            *backfilled.entry(group.to_string()).or_default() += 1;
        }

        let mut report = SyncReport::new();
        let mut groups: Vec<_> = backfilled.into_iter().collect();
        groups.sort();
        for (group, count) in groups {
            info!(group = %group, backfilled = count, "Router routes materialized into storage");
            report.record_ok(
                &group,
                SyncStage::Reconcile,
                format!("{} route(s) backfilled", count),
            );
        }
        Ok(report)
    }
}
