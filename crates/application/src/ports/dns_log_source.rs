use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_domain::{DnsLogEntry, DomainError};

#[async_trait]
pub trait DnsLogSource: Send + Sync {
    /// Entries logged at or after `since`. Sources that track their own
    /// position (log files) may ignore the timestamp.
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<DnsLogEntry>, DomainError>;
}
