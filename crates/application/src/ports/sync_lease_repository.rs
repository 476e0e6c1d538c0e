use async_trait::async_trait;
use route_sync_domain::DomainError;

/// Advisory, expiring lease rows shared by every process using the same
/// database.
#[async_trait]
pub trait SyncLeaseRepository: Send + Sync {
    /// Takes the lease when it is free, expired, or already ours.
    async fn try_acquire(&self, name: &str, holder: &str, ttl_secs: u64)
        -> Result<bool, DomainError>;
    async fn release(&self, name: &str, holder: &str) -> Result<(), DomainError>;
}
