use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Seconds between periodic fleet syncs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Take an advisory lease row before mutating the router.
    #[serde(default)]
    pub use_lease: bool,

    #[serde(default = "default_lease_ttl_secs")]
    pub lease_ttl_secs: u64,

    /// How long to wait for a held lease before mutating anyway.
    #[serde(default = "default_lease_wait_secs")]
    pub lease_wait_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            use_lease: false,
            lease_ttl_secs: default_lease_ttl_secs(),
            lease_wait_secs: default_lease_wait_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_lease_ttl_secs() -> u64 {
    60
}

fn default_lease_wait_secs() -> u64 {
    15
}
