use route_sync_infrastructure::repositories::{
    SqliteDomainGroupRepository, SqliteJournalRepository, SqliteRouteRepository,
    SqliteSyncLeaseRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub groups: Arc<SqliteDomainGroupRepository>,
    pub routes: Arc<SqliteRouteRepository>,
    pub journal: Arc<SqliteJournalRepository>,
    pub sync_lease: Arc<SqliteSyncLeaseRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            groups: Arc::new(SqliteDomainGroupRepository::new(pool.clone())),
            routes: Arc::new(SqliteRouteRepository::new(pool.clone())),
            journal: Arc::new(SqliteJournalRepository::new(pool.clone())),
            sync_lease: Arc::new(SqliteSyncLeaseRepository::new(pool)),
        }
    }
}
