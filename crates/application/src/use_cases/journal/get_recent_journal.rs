use crate::ports::JournalRepository;
use route_sync_domain::{DomainError, JournalEntry};
use std::sync::Arc;

pub struct GetRecentJournalUseCase {
    journal_repo: Arc<dyn JournalRepository>,
}

impl GetRecentJournalUseCase {
    pub fn new(journal_repo: Arc<dyn JournalRepository>) -> Self {
        Self { journal_repo }
    }

    pub async fn execute(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        self.journal_repo.get_recent(limit.clamp(1, 10_000)).await
    }
}
