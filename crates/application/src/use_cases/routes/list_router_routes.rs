use crate::ports::RouterGateway;
use crate::services::ObservedTable;
use route_sync_domain::{DomainError, RouterRoute};
use std::sync::Arc;

/// An observed route with its parsed owner and canonical interface id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRoute {
    pub route: RouterRoute,
    pub group: Option<String>,
    pub interface_id: String,
}

pub struct ListRouterRoutesUseCase {
    gateway: Arc<dyn RouterGateway>,
}

impl ListRouterRoutesUseCase {
    pub fn new(gateway: Arc<dyn RouterGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self) -> Result<Vec<AnnotatedRoute>, DomainError> {
        let observed = ObservedTable::fetch(self.gateway.as_ref()).await?;
        let ObservedTable { aliases, routes } = observed;

        Ok(routes
            .into_iter()
            .map(|route| AnnotatedRoute {
                group: route.group().map(str::to_string),
                interface_id: aliases.canonical(&route.interface),
                route,
            })
            .collect())
    }
}
