use super::client::RouterClient;
use super::rci;
use async_trait::async_trait;
use route_sync_application::ports::RouterGateway;
use route_sync_domain::{BatchOutcome, DomainError, RouteCandidate, RouterInterface, RouterRoute};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const INTERFACES_PATH: &str = "rci/show/interface";
const ROUTE_RESOURCE_PATH: &str = "rci/ip/route";

/// Route table access over RCI.
pub struct KeeneticRouterGateway {
    client: Arc<RouterClient>,
}

impl KeeneticRouterGateway {
    pub fn new(client: Arc<RouterClient>) -> Self {
        Self { client }
    }

    async fn mutate(&self, routes: &[RouteCandidate], delete: bool) -> Result<BatchOutcome, DomainError> {
        if routes.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let body = rci::mutate_batch(routes, delete);
        let replies = rci::parse_reply(self.client.post_rci(&body).await?)?;
        let outcome = rci::batch_outcome(&replies);

        for message in outcome.errors() {
            warn!(host = %self.client.host(), message = %message, delete, "Router rejected route");
        }
        info!(
            host = %self.client.host(),
            requested = routes.len(),
            failed = outcome.errors().len(),
            delete,
            "Route batch applied"
        );

        Ok(outcome)
    }
}

#[async_trait]
impl RouterGateway for KeeneticRouterGateway {
    #[instrument(skip(self))]
    async fn list_interfaces(&self) -> Result<Vec<RouterInterface>, DomainError> {
        rci::interfaces(self.client.get(INTERFACES_PATH).await?)
    }

    #[instrument(skip(self))]
    async fn list_routes(&self) -> Result<Vec<RouterRoute>, DomainError> {
        let replies = rci::parse_reply(self.client.post_rci(&rci::show_routes()).await?)?;

        if let Some(routes) = rci::route_table(replies) {
            debug!(routes = routes.len(), "Read route table");
            return Ok(routes);
        }

        warn!("RCI reply had no route table, reading the ip/route resource");
        rci::route_resource(self.client.get(ROUTE_RESOURCE_PATH).await?)
    }

    #[instrument(skip(self, routes), fields(count = routes.len()))]
    async fn add_routes(&self, routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError> {
        self.mutate(routes, false).await
    }

    #[instrument(skip(self, routes), fields(count = routes.len()))]
    async fn delete_routes(&self, routes: &[RouteCandidate]) -> Result<BatchOutcome, DomainError> {
        self.mutate(routes, true).await
    }
}
