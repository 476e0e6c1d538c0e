use std::net::Ipv4Addr;

/// A DNS query observed in the external query log, with its A answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsLogEntry {
    pub query: String,
    pub answers: Vec<Ipv4Addr>,
}

impl DnsLogEntry {
    pub fn new(query: impl Into<String>, answers: Vec<Ipv4Addr>) -> Self {
        Self {
            query: query.into(),
            answers,
        }
    }

    /// Queried name without the trailing root dot, lowercased.
    pub fn queried_domain(&self) -> String {
        self.query.trim().trim_end_matches('.').to_ascii_lowercase()
    }
}

/// Exact or subdomain match: `api.example.com` matches `example.com`,
/// `notexample.com` does not.
pub fn domain_matches(queried: &str, monitored: &str) -> bool {
    let queried = queried.trim_end_matches('.').to_ascii_lowercase();
    let monitored = monitored.trim_end_matches('.').to_ascii_lowercase();
    if monitored.is_empty() {
        return false;
    }
    queried == monitored || queried.ends_with(&format!(".{}", monitored))
}
