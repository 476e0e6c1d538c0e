use crate::errors::DomainError;
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    /// Resolved on every generation pass and watched in the DNS log.
    FollowDns,
}

impl DomainKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            DomainKind::FollowDns => "follow_dns",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "follow_dns" => Some(DomainKind::FollowDns),
            _ => None,
        }
    }
}

/// One configured entry of a group: hostname, IPv4 address or CIDR literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub id: Option<i64>,
    pub group_id: i64,
    pub domain: Arc<str>,
    pub kind: DomainKind,
}

impl DomainEntry {
    pub fn new(id: Option<i64>, group_id: i64, domain: Arc<str>) -> Self {
        Self {
            id,
            group_id,
            domain,
            kind: DomainKind::FollowDns,
        }
    }

    pub fn target(&self) -> Result<DomainTarget, DomainError> {
        DomainTarget::parse(&self.domain)
    }
}

/// What a domain-string denotes once classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainTarget {
    Host(String),
    Address(Ipv4Addr),
    Range(Ipv4Network),
}

impl DomainTarget {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidDomainEntry("empty entry".to_string()));
        }

        if value.contains('/') {
            let network = Ipv4Network::from_str(value)
                .map_err(|e| DomainError::InvalidDomainEntry(format!("{}: {}", value, e)))?;
            return Ok(DomainTarget::Range(network));
        }

        if let Ok(address) = value.parse::<Ipv4Addr>() {
            return Ok(DomainTarget::Address(address));
        }

        let host = value.trim_end_matches('.').to_ascii_lowercase();
        let valid = host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_');
        if host.is_empty() || !valid {
            return Err(DomainError::InvalidDomainEntry(value.to_string()));
        }
        Ok(DomainTarget::Host(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(DomainKind::parse("follow_dns"), Some(DomainKind::FollowDns));
        assert_eq!(DomainKind::FollowDns.to_str(), "follow_dns");
        assert_eq!(DomainKind::parse("static"), None);
    }

    #[test]
    fn test_parse_cidr_normalizes_network() {
        match DomainTarget::parse("10.1.2.3/8").unwrap() {
            DomainTarget::Range(net) => {
                assert_eq!(net.network(), Ipv4Addr::new(10, 0, 0, 0));
                assert_eq!(net.mask(), Ipv4Addr::new(255, 0, 0, 0));
            }
            other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_host_lowercases_and_strips_root() {
        assert_eq!(
            DomainTarget::parse("Api.Example.COM.").unwrap(),
            DomainTarget::Host("api.example.com".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DomainTarget::parse("").is_err());
        assert!(DomainTarget::parse("bad domain").is_err());
        assert!(DomainTarget::parse("10.0.0.0/40").is_err());
    }
}
