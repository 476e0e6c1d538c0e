use super::entry::{RawLogEntry, RawLogPage};
use crate::http_error;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use route_sync_application::ports::DnsLogSource;
use route_sync_domain::{DnsLogEntry, DomainError};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Polls `<base>?since=<RFC3339>` on a DNS server's query-log API.
pub struct HttpDnsLogSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDnsLogSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::ConfigError(format!("Invalid log URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or("dns-log")
    }
}

#[async_trait]
impl DnsLogSource for HttpDnsLogSource {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<DnsLogEntry>, DomainError> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("since", since.as_str())])
            .send()
            .await
            .map_err(|e| http_error::classify(&e, self.host()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Network {
                host: self.host().to_string(),
                reason: format!("query log returned HTTP {}", status.as_u16()),
            });
        }

        let page: RawLogPage = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidData(format!("Malformed query log response: {}", e)))?;

        let total = page.results.len();
        let entries: Vec<DnsLogEntry> = page
            .results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawLogEntry>(value) {
                Ok(raw) => Some(raw.into_entry()),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed query log entry");
                    None
                }
            })
            .collect();

        debug!(total, parsed = entries.len(), "Fetched query log page");
        Ok(entries)
    }
}
