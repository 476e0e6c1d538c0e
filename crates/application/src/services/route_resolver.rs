use crate::ports::HostResolver;
use route_sync_domain::auto_tag::{self, DIRECT_IP, DIRECT_RANGE};
use route_sync_domain::netmask::{self, HOST_MASK};
use route_sync_domain::{DomainEntry, DomainError, DomainGroup, DomainTarget, RouteCandidate};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns a group's domain entries into candidate routes.
///
/// Literal addresses and ranges are routed as written. Hostnames are looked
/// up against the configured DNS servers in order; the first server that
/// answers with at least one address wins and later servers are not asked.
pub struct RouteResolver {
    host_resolver: Arc<dyn HostResolver>,
    dns_servers: Vec<String>,
    default_interface: String,
    default_mask: String,
}

impl RouteResolver {
    pub fn new(
        host_resolver: Arc<dyn HostResolver>,
        dns_servers: Vec<String>,
        default_interface: impl Into<String>,
        default_mask: impl Into<String>,
    ) -> Self {
        Self {
            host_resolver,
            dns_servers,
            default_interface: default_interface.into(),
            default_mask: default_mask.into(),
        }
    }

    /// Candidates for every entry of `group`, de-duplicated on
    /// (network, mask, interface) with the first comment kept.
    pub async fn resolve(
        &self,
        group: &DomainGroup,
        domains: &[DomainEntry],
    ) -> Result<Vec<RouteCandidate>, DomainError> {
        let mask = group.effective_mask(&self.default_mask)?;
        let interfaces = group.interface_list(&self.default_interface);
        if interfaces.is_empty() {
            warn!(group = %group.name, "Group has no interface and no default is configured");
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for entry in domains {
            let resolved = match entry.target() {
                Ok(target) => self.resolve_target(&group.name, &target, mask, &interfaces).await,
                Err(e) => {
                    warn!(group = %group.name, domain = %entry.domain, error = %e, "Skipping invalid domain entry");
                    continue;
                }
            };

            for candidate in resolved {
                if seen.insert(candidate.key()) {
                    candidates.push(candidate);
                }
            }
        }

        debug!(group = %group.name, candidates = candidates.len(), "Group resolved");
        Ok(candidates)
    }

    async fn resolve_target(
        &self,
        group: &str,
        target: &DomainTarget,
        mask: Ipv4Addr,
        interfaces: &[String],
    ) -> Vec<RouteCandidate> {
        match target {
            DomainTarget::Address(address) => {
                let comment = auto_tag::format_comment(group, DIRECT_IP);
                per_interface(&[*address], HOST_MASK, interfaces, &comment)
            }
            DomainTarget::Range(range) => {
                let comment = auto_tag::format_comment(group, DIRECT_RANGE);
                per_interface(&[range.network()], range.mask(), interfaces, &comment)
            }
            DomainTarget::Host(host) => {
                let addresses = match self.lookup(host).await {
                    Ok(addresses) => addresses,
                    Err(e) => {
                        warn!(group, domain = %host, error = %e, "Domain contributes no routes this pass");
                        return Vec::new();
                    }
                };

                let mut networks: Vec<Ipv4Addr> = Vec::new();
                for address in addresses {
                    let network = netmask::route_network(address, mask);
                    if !networks.contains(&network) {
                        networks.push(network);
                    }
                }

                let comment = auto_tag::format_comment(group, host);
                per_interface(&networks, mask, interfaces, &comment)
            }
        }
    }

    /// A records from the first server that returns any, minus loopback.
    ///
    /// A server answering only with loopback still ends the search; the
    /// result is then empty.
    pub async fn lookup(&self, host: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        for server in &self.dns_servers {
            match self.host_resolver.lookup_a(server, host).await {
                Ok(addresses) if addresses.is_empty() => {
                    debug!(server = %server, domain = %host, "No A records, trying next server");
                }
                Ok(addresses) => {
                    return Ok(addresses
                        .into_iter()
                        .filter(|a| !a.is_loopback())
                        .collect());
                }
                Err(e) => {
                    warn!(server = %server, domain = %host, error = %e, "DNS lookup failed, trying next server");
                }
            }
        }

        Err(DomainError::Resolution {
            domain: host.to_string(),
        })
    }
}

fn per_interface(
    networks: &[Ipv4Addr],
    mask: Ipv4Addr,
    interfaces: &[String],
    comment: &str,
) -> Vec<RouteCandidate> {
    networks
        .iter()
        .flat_map(|network| {
            interfaces
                .iter()
                .map(move |iface| RouteCandidate::new(*network, mask, iface.clone(), comment))
        })
        .collect()
}
