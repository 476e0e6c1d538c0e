use route_sync_domain::config::DatabaseConfig;
use route_sync_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = format!("sqlite:{}", cfg.path);
    info!("Initializing database: {}", database_url);

    let pool = create_pool(&database_url, cfg.max_connections, cfg.busy_timeout_secs)
        .await
        .map_err(|e| {
            error!("Failed to initialize database pool: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!(
        "Database initialized successfully (max_connections={})",
        cfg.max_connections
    );

    Ok(pool)
}
