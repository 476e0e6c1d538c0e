use crate::ports::DomainGroupRepository;
use route_sync_domain::{domain_matches, DomainError, DomainTarget};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A group's hostname entries and the interfaces its routes egress on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredGroup {
    pub name: String,
    pub interfaces: Vec<String>,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch {
    pub group: String,
    pub monitored: String,
    pub interfaces: Vec<String>,
}

/// Every (group, monitored domain) pair that `queried` falls under.
pub fn find_matches(groups: &[MonitoredGroup], queried: &str) -> Vec<DomainMatch> {
    let mut matches = Vec::new();
    for group in groups {
        for domain in &group.domains {
            if domain_matches(queried, domain) {
                matches.push(DomainMatch {
                    group: group.name.clone(),
                    monitored: domain.clone(),
                    interfaces: group.interfaces.clone(),
                });
            }
        }
    }
    matches
}

type Snapshot = Arc<Vec<MonitoredGroup>>;

/// Short-lived cache over the group table so the watcher does not hit
/// storage on every poll.
pub struct MonitoredDomains {
    group_repo: Arc<dyn DomainGroupRepository>,
    default_interface: String,
    ttl: Duration,
    cached: RwLock<Option<(Instant, Snapshot)>>,
}

impl MonitoredDomains {
    pub fn new(
        group_repo: Arc<dyn DomainGroupRepository>,
        default_interface: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            group_repo,
            default_interface: default_interface.into(),
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn snapshot(&self) -> Result<Snapshot, DomainError> {
        if let Some((loaded_at, groups)) = self.cached.read().await.as_ref() {
            if loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(groups));
            }
        }

        let groups = Arc::new(self.load().await?);
        *self.cached.write().await = Some((Instant::now(), Arc::clone(&groups)));
        Ok(groups)
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<Vec<MonitoredGroup>, DomainError> {
        let mut loaded = Vec::new();
        for group in self.group_repo.get_all().await? {
            let Some(group_id) = group.id else {
                continue;
            };

            let domains: Vec<String> = self
                .group_repo
                .get_domains(group_id)
                .await?
                .iter()
                .filter_map(|entry| match entry.target() {
                    Ok(DomainTarget::Host(host)) => Some(host),
                    _ => None,
                })
                .collect();
            if domains.is_empty() {
                continue;
            }

            loaded.push(MonitoredGroup {
                name: group.name.to_string(),
                interfaces: group.interface_list(&self.default_interface),
                domains,
            });
        }

        debug!(groups = loaded.len(), "Monitored domains reloaded");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_can_match_several_groups() {
        let groups = vec![
            MonitoredGroup {
                name: "vpn".to_string(),
                interfaces: vec!["Wireguard0".to_string()],
                domains: vec!["example.com".to_string(), "api.example.com".to_string()],
            },
            MonitoredGroup {
                name: "isp".to_string(),
                interfaces: vec!["ISP".to_string()],
                domains: vec!["example.com".to_string()],
            },
        ];

        let matches = find_matches(&groups, "api.example.com");
        assert_eq!(matches.len(), 3);
        assert!(find_matches(&groups, "notexample.com").is_empty());
    }
}
