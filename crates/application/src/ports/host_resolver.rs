use async_trait::async_trait;
use route_sync_domain::DomainError;
use std::net::Ipv4Addr;

#[async_trait]
pub trait HostResolver: Send + Sync {
    /// A records for `domain` as answered by one specific `server`.
    ///
    /// Timeouts, SERVFAIL and NXDOMAIN are errors so the caller can move on
    /// to the next server.
    async fn lookup_a(&self, server: &str, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
