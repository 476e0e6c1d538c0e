use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Processing journal rows older than this are purged daily.
    #[serde(default = "default_journal_retention_days")]
    pub journal_retention_days: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            journal_retention_days: default_journal_retention_days(),
        }
    }
}

fn default_db_path() -> String {
    "./route-sync.db".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_busy_timeout_secs() -> u64 {
    30
}

fn default_journal_retention_days() -> u32 {
    30
}
