use crate::auto_tag;
use crate::interface_aliases::InterfaceAliases;
use crate::netmask::HOST_MASK;
use crate::route::RouteKey;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A route as read back from the router. Never persisted.
///
/// The device reports host routes (`host`, implicit /32) and network routes
/// (`network` + `mask`) differently; [`RouterRoute::key`] folds both into
/// one [`RouteKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterRoute {
    pub network: Option<Ipv4Addr>,
    pub host: Option<Ipv4Addr>,
    pub mask: Option<Ipv4Addr>,
    pub interface: String,
    pub gateway: Option<String>,
    pub comment: Option<String>,
    pub auto: bool,
    pub reject: bool,
}

impl RouterRoute {
    pub fn destination(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        match (self.host, self.network, self.mask) {
            (Some(host), _, _) => Some((host, HOST_MASK)),
            (None, Some(network), Some(mask)) => Some((network, mask)),
            (None, Some(network), None) => Some((network, HOST_MASK)),
            _ => None,
        }
    }

    pub fn key(&self, aliases: &InterfaceAliases) -> Option<RouteKey> {
        self.destination()
            .map(|(network, mask)| RouteKey::new(network, mask, aliases.canonical(&self.interface)))
    }

    /// Owning group recovered from the auto-tag, if any.
    pub fn group(&self) -> Option<&str> {
        self.comment.as_deref().and_then(auto_tag::group_of)
    }

    pub fn is_tagged_for(&self, group: &str) -> bool {
        self.group() == Some(group)
    }

    pub fn is_uncommented(&self) -> bool {
        self.comment
            .as_deref()
            .map_or(true, |c| c.trim().is_empty())
    }
}
