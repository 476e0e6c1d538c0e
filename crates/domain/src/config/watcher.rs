use serde::{Deserialize, Serialize};

/// Where DNS query activity is read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsLogSourceConfig {
    /// HTTP endpoint queried as `<url>?since=<RFC3339>`.
    Url(String),
    /// Local append-only log, one JSON entry per line.
    File(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatcherConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub source: Option<DnsLogSourceConfig>,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Watermark used on the very first fetch.
    #[serde(default = "default_initial_lookback_secs")]
    pub initial_lookback_secs: u64,

    #[serde(default = "default_domains_cache_ttl_secs")]
    pub domains_cache_ttl_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            source: None,
            poll_interval_secs: default_poll_interval_secs(),
            initial_lookback_secs: default_initial_lookback_secs(),
            domains_cache_ttl_secs: default_domains_cache_ttl_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_initial_lookback_secs() -> u64 {
    600
}

fn default_domains_cache_ttl_secs() -> u64 {
    5
}
