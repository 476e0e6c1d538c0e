use crate::interface_aliases::InterfaceAliases;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Normalized route shape used for every desired/observed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteKey {
    pub network: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub interface: String,
}

impl RouteKey {
    pub fn new(network: Ipv4Addr, mask: Ipv4Addr, interface: impl Into<String>) -> Self {
        Self {
            network,
            mask,
            interface: interface.into(),
        }
    }

    pub fn normalized(&self, aliases: &InterfaceAliases) -> Self {
        Self {
            network: self.network,
            mask: self.mask,
            interface: aliases.canonical(&self.interface),
        }
    }
}

/// A route produced by resolution, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub network: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub interface: String,
    pub comment: String,
}

impl RouteCandidate {
    pub fn new(
        network: Ipv4Addr,
        mask: Ipv4Addr,
        interface: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            network,
            mask,
            interface: interface.into(),
            comment: comment.into(),
        }
    }

    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.network, self.mask, self.interface.clone())
    }

    /// Storage identity: the key plus the originating comment.
    pub fn identity(&self) -> (RouteKey, String) {
        (self.key(), self.comment.clone())
    }
}

/// A desired route persisted for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: Option<i64>,
    pub group_id: i64,
    pub network: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub interface: String,
    pub comment: String,
    pub synced_to_router: bool,
    pub synced_at: Option<DateTime<Utc>>,
}

impl Route {
    pub fn from_candidate(group_id: i64, candidate: &RouteCandidate) -> Self {
        Self {
            id: None,
            group_id,
            network: candidate.network,
            mask: candidate.mask,
            interface: candidate.interface.clone(),
            comment: candidate.comment.clone(),
            synced_to_router: false,
            synced_at: None,
        }
    }

    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.network, self.mask, self.interface.clone())
    }

    pub fn identity(&self) -> (RouteKey, String) {
        (self.key(), self.comment.clone())
    }

    pub fn to_candidate(&self) -> RouteCandidate {
        RouteCandidate::new(
            self.network,
            self.mask,
            self.interface.clone(),
            self.comment.clone(),
        )
    }
}
