use route_sync_domain::config::RouterConfig;
use route_sync_domain::DomainError;
use route_sync_infrastructure::router::{KeeneticRouterGateway, RouterClient};
use std::sync::Arc;
use tracing::info;

pub struct RouterServices {
    pub gateway: Arc<KeeneticRouterGateway>,
}

impl RouterServices {
    pub fn new(cfg: &RouterConfig) -> Result<Self, DomainError> {
        let client = Arc::new(RouterClient::new(cfg)?);
        info!(host = client.host(), "Router client ready");

        Ok(Self {
            gateway: Arc::new(KeeneticRouterGateway::new(client)),
        })
    }
}
