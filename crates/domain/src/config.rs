pub mod database;
pub mod errors;
pub mod logging;
pub mod root;
pub mod router;
pub mod routing;
pub mod sync;
pub mod watcher;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use router::RouterConfig;
pub use routing::RoutingConfig;
pub use sync::SyncConfig;
pub use watcher::{DnsLogSourceConfig, WatcherConfig};
