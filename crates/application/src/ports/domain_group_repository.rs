use async_trait::async_trait;
use route_sync_domain::{DomainEntry, DomainError, DomainGroup};

/// Read access to group configuration. Group/domain editing lives outside
/// this workspace.
#[async_trait]
pub trait DomainGroupRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<DomainGroup>, DomainError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<DomainGroup>, DomainError>;
    async fn get_domains(&self, group_id: i64) -> Result<Vec<DomainEntry>, DomainError>;
}
