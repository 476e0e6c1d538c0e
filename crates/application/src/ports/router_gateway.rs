use async_trait::async_trait;
use route_sync_domain::{BatchOutcome, DomainError, RouteCandidate, RouterInterface, RouterRoute};

/// The router's route table as seen by the reconciler.
///
/// Mutations are batched: one call issues one RPC regardless of how many
/// routes it carries. A returned `BatchOutcome` may still contain per-route
/// failures.
#[async_trait]
pub trait RouterGateway: Send + Sync {
    async fn list_interfaces(&self) -> Result<Vec<RouterInterface>, DomainError>;
    async fn list_routes(&self) -> Result<Vec<RouterRoute>, DomainError>;
    async fn add_routes(&self, routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError>;
    async fn delete_routes(&self, routes: &[RouteCandidate])
        -> Result<BatchOutcome, DomainError>;
}
