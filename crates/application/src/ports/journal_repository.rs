use async_trait::async_trait;
use route_sync_domain::{DomainError, JournalEntry};

#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn record(&self, entry: &JournalEntry) -> Result<(), DomainError>;
    async fn get_recent(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError>;
    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError>;
}
