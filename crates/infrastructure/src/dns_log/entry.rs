use chrono::{DateTime, Utc};
use route_sync_domain::DnsLogEntry;
use serde::Deserialize;
use serde_json::Value;
use std::net::Ipv4Addr;

/// One query as reported by the log API or written to the log file.
///
/// `answers` rows are `[type, value]` pairs; only IPv4 values are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLogEntry {
    request: RawRequest,
    #[serde(default)]
    answers: Vec<Value>,
    #[serde(default)]
    time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLogPage {
    #[serde(default)]
    pub results: Vec<Value>,
}

impl RawLogEntry {
    pub(crate) fn logged_before(&self, since: DateTime<Utc>) -> bool {
        self.time.is_some_and(|t| t < since)
    }

    pub(crate) fn into_entry(self) -> DnsLogEntry {
        let answers = self
            .answers
            .iter()
            .filter_map(|answer| match answer {
                Value::Array(pair) => pair.last().and_then(Value::as_str),
                Value::String(value) => Some(value.as_str()),
                _ => None,
            })
            .filter_map(|value| value.trim().parse::<Ipv4Addr>().ok())
            .collect();

        DnsLogEntry::new(self.request.query, answers)
    }
}
