use crate::ports::JournalRepository;
use route_sync_domain::DomainError;
use std::sync::Arc;
use tracing::info;

/// Data retention for the processing journal. Runs daily.
pub struct CleanupOldJournalUseCase {
    journal_repo: Arc<dyn JournalRepository>,
}

impl CleanupOldJournalUseCase {
    pub fn new(journal_repo: Arc<dyn JournalRepository>) -> Self {
        Self { journal_repo }
    }

    pub async fn execute(&self, retention_days: u32) -> Result<u64, DomainError> {
        let deleted = self.journal_repo.delete_older_than(retention_days).await?;
        info!(deleted, retention_days, "Old journal entries cleaned up");
        Ok(deleted)
    }
}
