use crate::ports::{DomainGroupRepository, RouteRepository, RouterGateway};
use crate::services::{plan_push, ObservedTable, RouterLease};
use chrono::Utc;
use route_sync_domain::{BatchOutcome, DomainError, DomainGroup};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushOutcome {
    pub added: usize,
    pub deleted: usize,
    pub marked_synced: u64,
}

/// Converges the router onto one group's stored desired routes.
///
/// Deletes go out before adds. Per-route failures from either batch are
/// collected into a single `RouterApi` error after both batches ran; rows
/// whose add succeeded are still marked synced.
pub struct PushToRouterUseCase {
    group_repo: Arc<dyn DomainGroupRepository>,
    route_repo: Arc<dyn RouteRepository>,
    gateway: Arc<dyn RouterGateway>,
    lease: Arc<RouterLease>,
    delete_obsolete: bool,
}

impl PushToRouterUseCase {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        route_repo: Arc<dyn RouteRepository>,
        gateway: Arc<dyn RouterGateway>,
        lease: Arc<RouterLease>,
        delete_obsolete: bool,
    ) -> Self {
        Self {
            group_repo,
            route_repo,
            gateway,
            lease,
            delete_obsolete,
        }
    }

    pub async fn execute_by_name(&self, name: &str) -> Result<PushOutcome, DomainError> {
        let group = self
            .group_repo
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))?;
        self.execute(&group).await
    }

    #[instrument(skip(self, group), fields(group = %group.name))]
    pub async fn execute(&self, group: &DomainGroup) -> Result<PushOutcome, DomainError> {
        self.lease.run(self.push(group)).await
    }

    async fn push(&self, group: &DomainGroup) -> Result<PushOutcome, DomainError> {
        let group_id = group
            .id
            .ok_or_else(|| DomainError::GroupNotFound(group.name.to_string()))?;

        let observed = ObservedTable::fetch(self.gateway.as_ref()).await?;
        let desired = self.route_repo.get_by_group(group_id).await?;
        let plan = plan_push(&group.name, &desired, &observed, self.delete_obsolete);

        let mut errors = Vec::new();
        let mut synced_ids = plan.already_present.clone();
        let mut outcome = PushOutcome::default();

        if !plan.to_delete.is_empty() {
            let result = self.gateway.delete_routes(&plan.to_delete).await?;
            outcome.deleted = count_succeeded(&result, plan.to_delete.len());
            errors.extend(result.errors());
        }

        if !plan.to_add.is_empty() {
            let result = self.gateway.add_routes(&plan.to_add).await?;
            match result.succeeded_positions(plan.to_add.len()) {
                Some(positions) => {
                    outcome.added = positions.len();
                    for position in positions {
                        synced_ids.extend_from_slice(&plan.add_owners[position]);
                    }
                }
                None if result.is_success() => {
                    outcome.added = plan.to_add.len();
                    synced_ids.extend(plan.add_owners.iter().flatten().copied());
                }
                None => {
                    warn!(
                        statuses = result.statuses.len(),
                        batch = plan.to_add.len(),
                        "Add batch statuses do not line up with the request, nothing marked synced"
                    );
                }
            }
            errors.extend(result.errors());
        }

        if !synced_ids.is_empty() {
            outcome.marked_synced = self.route_repo.mark_synced(&synced_ids, Utc::now()).await?;
        }

        info!(
            added = outcome.added,
            deleted = outcome.deleted,
            marked_synced = outcome.marked_synced,
            failed = errors.len(),
            "Group pushed to router"
        );

        if errors.is_empty() {
            Ok(outcome)
        } else {
            Err(DomainError::RouterApi { messages: errors })
        }
    }
}

fn count_succeeded(result: &BatchOutcome, batch_len: usize) -> usize {
    match result.succeeded_positions(batch_len) {
        Some(positions) => positions.len(),
        None if result.is_success() => batch_len,
        None => 0,
    }
}
