use super::{
    CleanupObsoleteUseCase, GenerateDesiredRoutesUseCase, PushToRouterUseCase,
    ReconcileFromRouterUseCase,
};
use crate::ports::DomainGroupRepository;
use route_sync_domain::{DomainError, SyncReport, SyncStage};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Whole-fleet pass. Every group gets its own result; one group failing
/// never stops the others.
///
/// Minimize mode skips resolution and backfill: it pushes what is already
/// stored and then clears out groups without domains.
pub struct FullSyncUseCase {
    group_repo: Arc<dyn DomainGroupRepository>,
    generate: Arc<GenerateDesiredRoutesUseCase>,
    push: Arc<PushToRouterUseCase>,
    cleanup: Arc<CleanupObsoleteUseCase>,
    reconcile: Arc<ReconcileFromRouterUseCase>,
    minimize: bool,
}

impl FullSyncUseCase {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        generate: Arc<GenerateDesiredRoutesUseCase>,
        push: Arc<PushToRouterUseCase>,
        cleanup: Arc<CleanupObsoleteUseCase>,
        reconcile: Arc<ReconcileFromRouterUseCase>,
        minimize: bool,
    ) -> Self {
        Self {
            group_repo,
            generate,
            push,
            cleanup,
            reconcile,
            minimize,
        }
    }

    #[instrument(skip(self), fields(minimize = self.minimize))]
    pub async fn execute(&self) -> Result<SyncReport, DomainError> {
        let groups = self.group_repo.get_all().await?;
        let mut report = SyncReport::new();

        if !self.minimize {
            for group in &groups {
                match self.generate.execute(group).await {
                    Ok(outcome) => report.record_ok(
                        &group.name,
                        SyncStage::Generate,
                        format!(
                            "{} inserted, {} deleted, {} duplicates removed",
                            outcome.inserted, outcome.deleted, outcome.duplicates_removed
                        ),
                    ),
                    Err(e) => {
                        warn!(group = %group.name, error = %e, "Generation failed");
                        report.record_err(&group.name, SyncStage::Generate, e.to_string());
                    }
                }
            }
        }

        for group in &groups {
            match self.push.execute(group).await {
                Ok(outcome) => report.record_ok(
                    &group.name,
                    SyncStage::Push,
                    format!("{} added, {} deleted", outcome.added, outcome.deleted),
                ),
                Err(e) => {
                    warn!(group = %group.name, error = %e, "Push failed");
                    report.record_err(&group.name, SyncStage::Push, e.messages().join("; "));
                }
            }
        }

        let tail = if self.minimize {
            self.cleanup.execute().await
        } else {
            self.reconcile.execute().await
        };
        match tail {
            Ok(tail_report) => report.merge(tail_report),
            Err(e) => {
                let stage = if self.minimize {
                    SyncStage::Cleanup
                } else {
                    SyncStage::Reconcile
                };
                error!(stage = %stage, error = %e, "Fleet stage failed");
                report.record_err("*", stage, e.to_string());
            }
        }

        let failures = report.failures().count();
        info!(
            groups = groups.len(),
            results = report.results.len(),
            failures,
            "Full sync finished"
        );
        Ok(report)
    }
}
