//! Route Sync Domain Layer
pub mod auto_tag;
pub mod config;
pub mod dns_log;
pub mod domain_entry;
pub mod domain_group;
pub mod errors;
pub mod interface_aliases;
pub mod journal;
pub mod netmask;
pub mod route;
pub mod route_batch;
pub mod router_route;
pub mod sync_report;

pub use config::{CliOverrides, Config, ConfigError, DnsLogSourceConfig};
pub use dns_log::{domain_matches, DnsLogEntry};
pub use domain_entry::{DomainEntry, DomainKind, DomainTarget};
pub use domain_group::DomainGroup;
pub use errors::DomainError;
pub use interface_aliases::{InterfaceAliases, RouterInterface};
pub use journal::{JournalEntry, JournalStatus};
pub use route::{Route, RouteCandidate, RouteKey};
pub use route_batch::{BatchOutcome, RouteStatus};
pub use router_route::RouterRoute;
pub use sync_report::{GroupSyncResult, SyncReport, SyncStage};
