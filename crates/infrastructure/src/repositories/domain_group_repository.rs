use async_trait::async_trait;
use route_sync_application::ports::DomainGroupRepository;
use route_sync_domain::{DomainEntry, DomainError, DomainGroup, DomainKind};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument, warn};

type GroupRow = (i64, String, Option<String>, Option<String>, String, String);
type DomainRow = (i64, i64, String, String);

const GROUP_SELECT: &str = "SELECT id, name, mask, interfaces,
            datetime(created_at) as created_at,
            datetime(updated_at) as updated_at
     FROM domain_groups";

pub struct SqliteDomainGroupRepository {
    pool: SqlitePool,
}

impl SqliteDomainGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_group(row: GroupRow) -> DomainGroup {
        let (id, name, mask, interfaces, created_at, updated_at) = row;

        DomainGroup {
            id: Some(id),
            name: Arc::from(name.as_str()),
            mask: mask.map(|s| Arc::from(s.as_str())),
            interfaces: interfaces.map(|s| Arc::from(s.as_str())),
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    fn row_to_domain(row: DomainRow) -> Option<DomainEntry> {
        let (id, group_id, domain, kind) = row;
        let Some(kind) = DomainKind::parse(&kind) else {
            warn!(id, kind = %kind, "Skipping domain with unknown kind");
            return None;
        };

        Some(DomainEntry {
            id: Some(id),
            group_id,
            domain: Arc::from(domain.as_str()),
            kind,
        })
    }

    /// Group management lives outside the reconciler; this is for seeding
    /// and tooling.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        name: &str,
        mask: Option<&str>,
        interfaces: Option<&str>,
    ) -> Result<DomainGroup, DomainError> {
        DomainGroup::validate_name(name).map_err(DomainError::InvalidData)?;

        let row = sqlx::query_as::<_, GroupRow>(
            "INSERT INTO domain_groups (name, mask, interfaces)
             VALUES (?, ?, ?)
             RETURNING id, name, mask, interfaces,
                       datetime(created_at) as created_at,
                       datetime(updated_at) as updated_at",
        )
        .bind(name)
        .bind(mask)
        .bind(interfaces)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DomainError::InvalidData(format!("Group '{}' already exists", name))
            } else {
                error!(error = %e, "Failed to create domain group");
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(Self::row_to_group(row))
    }

    #[instrument(skip(self))]
    pub async fn add_domain(&self, group_id: i64, domain: &str) -> Result<DomainEntry, DomainError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainEntry("empty domain".to_string()));
        }

        let row = sqlx::query_as::<_, DomainRow>(
            "INSERT INTO domains (group_id, domain, kind)
             VALUES (?, ?, ?)
             ON CONFLICT (group_id, domain, kind) DO UPDATE SET domain = excluded.domain
             RETURNING id, group_id, domain, kind",
        )
        .bind(group_id)
        .bind(domain)
        .bind(DomainKind::FollowDns.to_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to add domain");
            DomainError::DatabaseError(e.to_string())
        })?;

        Self::row_to_domain(row)
            .ok_or_else(|| DomainError::InvalidData("stored domain has unknown kind".to_string()))
    }
}

#[async_trait]
impl DomainGroupRepository for SqliteDomainGroupRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<DomainGroup>, DomainError> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!("{} ORDER BY name ASC", GROUP_SELECT))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query domain groups");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(Self::row_to_group).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Option<DomainGroup>, DomainError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!("{} WHERE name = ?", GROUP_SELECT))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query domain group by name");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(Self::row_to_group))
    }

    #[instrument(skip(self))]
    async fn get_domains(&self, group_id: i64) -> Result<Vec<DomainEntry>, DomainError> {
        let rows = sqlx::query_as::<_, DomainRow>(
            "SELECT id, group_id, domain, kind FROM domains
             WHERE group_id = ? ORDER BY id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query group domains");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().filter_map(Self::row_to_domain).collect())
    }
}
