use async_trait::async_trait;
use route_sync_application::ports::SyncLeaseRepository;
use route_sync_domain::DomainError;
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

pub struct SqliteSyncLeaseRepository {
    pool: SqlitePool,
}

impl SqliteSyncLeaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncLeaseRepository for SqliteSyncLeaseRepository {
    #[instrument(skip(self))]
    async fn try_acquire(&self, name: &str, holder: &str, ttl_secs: u64) -> Result<bool, DomainError> {
        let now = chrono::Utc::now().timestamp();
        let expires_at = now.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX));

        // Single statement: insert, or take over when expired or already ours.
        let result = sqlx::query(
            "INSERT INTO sync_leases (name, holder, expires_at) VALUES (?, ?, ?)
             ON CONFLICT (name) DO UPDATE
                SET holder = excluded.holder, expires_at = excluded.expires_at
                WHERE sync_leases.expires_at <= ? OR sync_leases.holder = excluded.holder",
        )
        .bind(name)
        .bind(holder)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to acquire lease");
            DomainError::DatabaseError(e.to_string())
        })?;

        let acquired = result.rows_affected() > 0;
        debug!(acquired, "Lease attempt");
        Ok(acquired)
    }

    #[instrument(skip(self))]
    async fn release(&self, name: &str, holder: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sync_leases WHERE name = ? AND holder = ?")
            .bind(name)
            .bind(holder)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to release lease");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
