use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_application::ports::RouteRepository;
use route_sync_domain::{DomainError, Route};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::net::Ipv4Addr;
use tracing::{error, instrument, warn};

type RouteRow = (i64, i64, String, String, String, String, bool, Option<String>);

const ROUTE_SELECT: &str = "SELECT id, group_id, network, mask, interface, comment,
            synced_to_router, synced_at
     FROM routes";

pub struct SqliteRouteRepository {
    pool: SqlitePool,
}

impl SqliteRouteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_route(row: RouteRow) -> Option<Route> {
        let (id, group_id, network, mask, interface, comment, synced, synced_at) = row;

        let (Ok(network), Ok(mask)) = (network.parse::<Ipv4Addr>(), mask.parse::<Ipv4Addr>())
        else {
            warn!(id, network = %network, mask = %mask, "Skipping route row with invalid address");
            return None;
        };

        Some(Route {
            id: Some(id),
            group_id,
            network,
            mask,
            interface,
            comment,
            synced_to_router: synced,
            synced_at: synced_at
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|t| t.with_timezone(&Utc)),
        })
    }
}

#[async_trait]
impl RouteRepository for SqliteRouteRepository {
    #[instrument(skip(self))]
    async fn get_by_group(&self, group_id: i64) -> Result<Vec<Route>, DomainError> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "{} WHERE group_id = ? ORDER BY id ASC",
            ROUTE_SELECT
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query routes by group");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().filter_map(Self::row_to_route).collect())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Route>, DomainError> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!("{} ORDER BY id ASC", ROUTE_SELECT))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query routes");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().filter_map(Self::row_to_route).collect())
    }

    #[instrument(skip(self, route), fields(group_id = route.group_id, network = %route.network))]
    async fn create(&self, route: &Route) -> Result<Route, DomainError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO routes (group_id, network, mask, interface, comment, synced_to_router, synced_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(route.group_id)
        .bind(route.network.to_string())
        .bind(route.mask.to_string())
        .bind(&route.interface)
        .bind(&route.comment)
        .bind(route.synced_to_router)
        .bind(route.synced_at.map(|t| t.to_rfc3339()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create route");
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut created = route.clone();
        created.id = Some(id);
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete route");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn mark_synced(&self, ids: &[i64], synced_at: DateTime<Utc>) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE routes SET synced_to_router = 1, synced_at = ");
        builder.push_bind(synced_at.to_rfc3339());
        builder.push(" WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&self.pool).await.map_err(|e| {
            error!(error = %e, "Failed to mark routes synced");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected())
    }
}
