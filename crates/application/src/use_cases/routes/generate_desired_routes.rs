use crate::ports::{DomainGroupRepository, RouteRepository};
use crate::services::{dedup_stored, diff_desired, RouteResolver};
use route_sync_domain::{DomainError, DomainGroup, Route};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub inserted: usize,
    pub deleted: usize,
    pub duplicates_removed: usize,
}

impl GenerationOutcome {
    pub fn changed(&self) -> bool {
        self.inserted + self.deleted + self.duplicates_removed > 0
    }
}

/// Re-resolves a group's domains and rewrites its stored desired routes.
pub struct GenerateDesiredRoutesUseCase {
    group_repo: Arc<dyn DomainGroupRepository>,
    route_repo: Arc<dyn RouteRepository>,
    resolver: Arc<RouteResolver>,
}

impl GenerateDesiredRoutesUseCase {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        route_repo: Arc<dyn RouteRepository>,
        resolver: Arc<RouteResolver>,
    ) -> Self {
        Self {
            group_repo,
            route_repo,
            resolver,
        }
    }

    pub async fn execute_by_name(&self, name: &str) -> Result<GenerationOutcome, DomainError> {
        let group = self
            .group_repo
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))?;
        self.execute(&group).await
    }

    #[instrument(skip(self, group), fields(group = %group.name))]
    pub async fn execute(&self, group: &DomainGroup) -> Result<GenerationOutcome, DomainError> {
        let group_id = group
            .id
            .ok_or_else(|| DomainError::GroupNotFound(group.name.to_string()))?;

        let domains = self.group_repo.get_domains(group_id).await?;
        let fresh = self.resolver.resolve(group, &domains).await?;

        let stored = self.route_repo.get_by_group(group_id).await?;
        let (stored, duplicates) = dedup_stored(stored);
        for duplicate in &duplicates {
            if let Some(id) = duplicate.id {
                self.route_repo.delete(id).await?;
            }
        }

        let diff = diff_desired(&stored, &fresh);
        for obsolete in &diff.to_delete {
            if let Some(id) = obsolete.id {
                self.route_repo.delete(id).await?;
            }
        }
        for candidate in &diff.to_insert {
            self.route_repo
                .create(&Route::from_candidate(group_id, candidate))
                .await?;
        }

        let outcome = GenerationOutcome {
            inserted: diff.to_insert.len(),
            deleted: diff.to_delete.len(),
            duplicates_removed: duplicates.len(),
        };

        info!(
            domains = domains.len(),
            candidates = fresh.len(),
            inserted = outcome.inserted,
            deleted = outcome.deleted,
            duplicates = outcome.duplicates_removed,
            "Desired routes generated"
        );
        Ok(outcome)
    }
}
