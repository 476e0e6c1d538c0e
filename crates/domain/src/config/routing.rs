use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Egress interface for groups that do not name their own.
    #[serde(default)]
    pub default_interface: String,

    /// Prefix (`24`) or dotted mask applied when a group has none.
    #[serde(default = "default_mask")]
    pub default_mask: String,

    /// Resolvers tried in order, `ip` or `ip:port`.
    #[serde(default = "default_dns_servers")]
    pub dns_servers: Vec<String>,

    #[serde(default = "default_dns_timeout_secs")]
    pub dns_timeout_secs: u64,

    /// Remove group-tagged router routes no longer implied by any domain.
    #[serde(default = "default_true")]
    pub delete_obsolete: bool,

    /// Periodic sync runs push + cleanup only, skipping generation and
    /// reconciliation.
    #[serde(default)]
    pub minimize: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_interface: String::new(),
            default_mask: default_mask(),
            dns_servers: default_dns_servers(),
            dns_timeout_secs: default_dns_timeout_secs(),
            delete_obsolete: true,
            minimize: false,
        }
    }
}

fn default_mask() -> String {
    "24".to_string()
}

fn default_dns_servers() -> Vec<String> {
    vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]
}

fn default_dns_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}
