use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::router::RouterConfig;
use super::routing::RoutingConfig;
use super::sync::SyncConfig;
use super::watcher::WatcherConfig;
use crate::netmask;

/// Main configuration structure for route-sync
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Router address and credentials
    #[serde(default)]
    pub router: RouterConfig,

    /// Resolution and reconciliation defaults
    #[serde(default)]
    pub routing: RoutingConfig,

    /// DNS activity watcher
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Periodic fleet sync
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. route-sync.toml in current directory
    /// 3. /etc/route-sync/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.router_host {
            self.router.host = host;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Reject configurations that cannot drive any job. Runs before any
    /// loop starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.router.host.trim().is_empty() {
            return Err(ConfigError::Validation("router.host is required".to_string()));
        }
        if self.router.login.trim().is_empty() {
            return Err(ConfigError::Validation("router.login is required".to_string()));
        }
        if self.router.password.is_empty() {
            return Err(ConfigError::Validation(
                "router.password is required".to_string(),
            ));
        }
        if self.router.connect_timeout_secs == 0 || self.router.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "router timeouts must be greater than zero".to_string(),
            ));
        }

        if self.routing.dns_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No DNS servers configured".to_string(),
            ));
        }
        netmask::parse_mask(&self.routing.default_mask).map_err(|e| {
            ConfigError::Validation(format!("routing.default_mask: {}", e))
        })?;

        if self.watcher.enabled && self.watcher.source.is_none() {
            return Err(ConfigError::Validation(
                "watcher is enabled but no source (url or file) is configured".to_string(),
            ));
        }
        if self.watcher.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "watcher.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.sync.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "sync.interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("route-sync.toml").exists() {
            Some("route-sync.toml".to_string())
        } else if std::path::Path::new("/etc/route-sync/config.toml").exists() {
            Some("/etc/route-sync/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub router_host: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
