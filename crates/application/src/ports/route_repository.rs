use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_domain::{DomainError, Route};

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn get_by_group(&self, group_id: i64) -> Result<Vec<Route>, DomainError>;
    async fn get_all(&self) -> Result<Vec<Route>, DomainError>;
    async fn create(&self, route: &Route) -> Result<Route, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn mark_synced(&self, ids: &[i64], synced_at: DateTime<Utc>)
        -> Result<u64, DomainError>;
}
