use crate::ports::{DnsLogSource, JournalRepository, RouterGateway};
use crate::services::{
    find_matches, missing_from_router, MonitoredDomains, ObservedTable, RouterLease,
};
use chrono::{DateTime, Duration, Utc};
use route_sync_domain::auto_tag;
use route_sync_domain::netmask::{self, route_network};
use route_sync_domain::{
    DnsLogEntry, DomainError, JournalEntry, JournalStatus, RouteCandidate, RouteKey,
};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

const ACTIVITY_PREFIX: u8 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityOutcome {
    pub entries: usize,
    pub matched: usize,
    pub skipped: usize,
    pub routes_added: usize,
    pub failed: usize,
}

/// One matched (query, group) pair and the routes it asked for.
struct Trigger {
    domain: String,
    group: String,
    keys: Vec<RouteKey>,
}

/// One poll of the DNS query log.
///
/// The watermark moves to the time the fetch started as soon as the fetch
/// succeeds, whatever happens afterwards. A failed fetch leaves it alone so
/// the same window is asked for again.
pub struct ProcessDnsActivityUseCase {
    log_source: Arc<dyn DnsLogSource>,
    monitored: Arc<MonitoredDomains>,
    gateway: Arc<dyn RouterGateway>,
    journal_repo: Arc<dyn JournalRepository>,
    lease: Arc<RouterLease>,
    watermark: Mutex<DateTime<Utc>>,
}

impl ProcessDnsActivityUseCase {
    pub fn new(
        log_source: Arc<dyn DnsLogSource>,
        monitored: Arc<MonitoredDomains>,
        gateway: Arc<dyn RouterGateway>,
        journal_repo: Arc<dyn JournalRepository>,
        lease: Arc<RouterLease>,
        initial_lookback_secs: u64,
    ) -> Self {
        let lookback = Duration::seconds(i64::try_from(initial_lookback_secs).unwrap_or(i64::MAX));
        let start = Utc::now()
            .checked_sub_signed(lookback)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            log_source,
            monitored,
            gateway,
            journal_repo,
            lease,
            watermark: Mutex::new(start),
        }
    }

    pub async fn watermark(&self) -> DateTime<Utc> {
        *self.watermark.lock().await
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<ActivityOutcome, DomainError> {
        let mut watermark = self.watermark.lock().await;
        let since = *watermark;
        let started = Utc::now();

        let entries = self.log_source.fetch_since(since).await?;
        *watermark = started.max(since);
        drop(watermark);

        let mut outcome = ActivityOutcome {
            entries: entries.len(),
            ..ActivityOutcome::default()
        };
        if entries.is_empty() {
            return Ok(outcome);
        }

        let groups = self.monitored.snapshot().await?;

        let mut triggers = Vec::new();
        let mut batch: Vec<RouteCandidate> = Vec::new();
        let mut batched = HashSet::new();

        for entry in &entries {
            let queried = entry.queried_domain();
            let matches = find_matches(&groups, &queried);
            if matches.is_empty() {
                outcome.skipped += 1;
                self.journal(JournalEntry::new(
                    queried,
                    None,
                    JournalStatus::Skipped,
                    Some("no monitored domain matched".to_string()),
                ))
                .await;
                continue;
            }

            let networks = activity_networks(entry);
            let mut seen_groups = HashSet::new();
            for m in matches {
                if !seen_groups.insert(m.group.clone()) {
                    continue;
                }
                let comment = auto_tag::format_comment(&m.group, &queried);
                let mut keys = Vec::new();
                for network in &networks {
                    for iface in &m.interfaces {
                        let candidate =
                            RouteCandidate::new(*network, mask(), iface.clone(), &comment);
                        keys.push(candidate.key());
                        if batched.insert(candidate.key()) {
                            batch.push(candidate);
                        }
                    }
                }
                outcome.matched += 1;
                triggers.push(Trigger {
                    domain: queried.clone(),
                    group: m.group,
                    keys,
                });
            }
        }

        if triggers.is_empty() {
            return Ok(outcome);
        }

        let applied = if batch.is_empty() {
            Ok(ApplyResult::default())
        } else {
            self.lease.run(self.apply(&batch)).await
        };

        for trigger in &triggers {
            self.journal(JournalEntry::new(
                trigger.domain.clone(),
                Some(&trigger.group),
                JournalStatus::Processed,
                None,
            ))
            .await;

            let (status, message) = match &applied {
                _ if trigger.keys.is_empty() => (
                    JournalStatus::Skipped,
                    "no IPv4 answers to route".to_string(),
                ),
                Ok(result) => match trigger.keys.iter().find_map(|k| result.failure_for(k)) {
                    Some(message) => (JournalStatus::Error, message),
                    None => (
                        JournalStatus::Added,
                        format!("{} route(s) ensured", trigger.keys.len()),
                    ),
                },
                Err(e) => (JournalStatus::Error, e.to_string()),
            };
            if status == JournalStatus::Error {
                outcome.failed += 1;
            }
            self.journal(JournalEntry::new(
                trigger.domain.clone(),
                Some(&trigger.group),
                status,
                Some(message),
            ))
            .await;
        }

        if let Ok(result) = &applied {
            outcome.routes_added = result.added;
        }

        info!(
            entries = outcome.entries,
            matched = outcome.matched,
            skipped = outcome.skipped,
            added = outcome.routes_added,
            failed = outcome.failed,
            "DNS activity processed"
        );
        Ok(outcome)
    }

    async fn apply(&self, batch: &[RouteCandidate]) -> Result<ApplyResult, DomainError> {
        let observed = ObservedTable::fetch(self.gateway.as_ref()).await?;
        let missing = missing_from_router(batch, &observed);
        if missing.is_empty() {
            debug!(candidates = batch.len(), "All triggered routes already on router");
            return Ok(ApplyResult::default());
        }

        let outcome = self.gateway.add_routes(&missing).await?;
        let mut result = ApplyResult::default();
        match outcome.succeeded_positions(missing.len()) {
            Some(ok_positions) => {
                result.added = ok_positions.len();
                for (position, status) in outcome.statuses.iter().enumerate() {
                    if !status.ok {
                        let message = status
                            .message
                            .clone()
                            .unwrap_or_else(|| "route rejected without message".to_string());
                        result
                            .failed
                            .push((observed.normalize(&missing[position].key()), message));
                    }
                }
            }
            None => {
                outcome.into_result()?;
                result.added = missing.len();
            }
        }
        result.observed = Some(observed);
        Ok(result)
    }

    async fn journal(&self, entry: JournalEntry) {
        if let Err(e) = self.journal_repo.record(&entry).await {
            warn!(domain = %entry.domain, error = %e, "Failed to write journal entry");
        }
    }
}

#[derive(Default)]
struct ApplyResult {
    added: usize,
    failed: Vec<(RouteKey, String)>,
    observed: Option<ObservedTable>,
}

impl ApplyResult {
    fn failure_for(&self, key: &RouteKey) -> Option<String> {
        let key = match &self.observed {
            Some(table) => table.normalize(key),
            None => key.clone(),
        };
        self.failed
            .iter()
            .find(|(failed, _)| *failed == key)
            .map(|(_, message)| message.clone())
    }
}

fn mask() -> Ipv4Addr {
    netmask::prefix_to_mask(ACTIVITY_PREFIX).unwrap_or(Ipv4Addr::new(255, 255, 255, 0))
}

/// Distinct /24 networks of the non-loopback answers.
fn activity_networks(entry: &DnsLogEntry) -> Vec<Ipv4Addr> {
    let mut networks = Vec::new();
    for answer in entry.answers.iter().filter(|a| !a.is_loopback()) {
        let network = route_network(*answer, mask());
        if !networks.contains(&network) {
            networks.push(network);
        }
    }
    networks
}
