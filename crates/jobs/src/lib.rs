pub mod dns_watcher;
pub mod journal_retention;
pub mod route_sync;
pub mod runner;

pub use dns_watcher::DnsWatcherJob;
pub use journal_retention::JournalRetentionJob;
pub use route_sync::RouteSyncJob;
pub use runner::JobRunner;
