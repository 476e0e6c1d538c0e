mod dns_log_source;
mod domain_group_repository;
mod host_resolver;
mod journal_repository;
mod route_repository;
mod router_gateway;
mod sync_lease_repository;

pub use dns_log_source::DnsLogSource;
pub use domain_group_repository::DomainGroupRepository;
pub use host_resolver::HostResolver;
pub use journal_repository::JournalRepository;
pub use route_repository::RouteRepository;
pub use router_gateway::RouterGateway;
pub use sync_lease_repository::SyncLeaseRepository;
