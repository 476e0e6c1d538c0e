use async_trait::async_trait;
use route_sync_application::ports::JournalRepository;
use route_sync_domain::{DomainError, JournalEntry, JournalStatus};
use sqlx::SqlitePool;
use tracing::{error, instrument};

type JournalRow = (i64, String, Option<String>, String, Option<String>, String);

pub struct SqliteJournalRepository {
    pool: SqlitePool,
}

impl SqliteJournalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: JournalRow) -> JournalEntry {
        let (id, domain, group_name, status, message, created_at) = row;

        JournalEntry {
            id: Some(id),
            domain,
            group_name,
            status: JournalStatus::parse(&status).unwrap_or(JournalStatus::Error),
            message,
            created_at: Some(created_at),
        }
    }
}

#[async_trait]
impl JournalRepository for SqliteJournalRepository {
    #[instrument(skip(self, entry), fields(domain = %entry.domain, status = %entry.status))]
    async fn record(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO processing_journal (domain, group_name, status, message)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.domain)
        .bind(&entry.group_name)
        .bind(entry.status.to_str())
        .bind(&entry.message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write journal entry");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_recent(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT id, domain, group_name, status, message,
                    datetime(created_at) as created_at
             FROM processing_journal
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query journal");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Self::row_to_entry).collect())
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError> {
        let result =
            sqlx::query("DELETE FROM processing_journal WHERE created_at < datetime('now', ?)")
                .bind(format!("-{} days", days))
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to delete old journal entries");
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(result.rows_affected())
    }
}
