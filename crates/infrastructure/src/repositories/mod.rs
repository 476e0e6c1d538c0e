pub mod domain_group_repository;
pub mod journal_repository;
pub mod route_repository;
pub mod sync_lease_repository;

pub use domain_group_repository::SqliteDomainGroupRepository;
pub use journal_repository::SqliteJournalRepository;
pub use route_repository::SqliteRouteRepository;
pub use sync_lease_repository::SqliteSyncLeaseRepository;
