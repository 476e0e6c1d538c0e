use crate::ports::RouterGateway;
use route_sync_domain::{
    DomainError, InterfaceAliases, Route, RouteCandidate, RouteKey, RouterRoute,
};
use std::collections::{HashMap, HashSet};

/// One read of the router: its interface synonyms and its full route table.
#[derive(Debug, Clone, Default)]
pub struct ObservedTable {
    pub aliases: InterfaceAliases,
    pub routes: Vec<RouterRoute>,
}

impl ObservedTable {
    pub async fn fetch(gateway: &dyn RouterGateway) -> Result<Self, DomainError> {
        let interfaces = gateway.list_interfaces().await?;
        let routes = gateway.list_routes().await?;
        Ok(Self {
            aliases: InterfaceAliases::new(&interfaces),
            routes,
        })
    }

    pub fn new(aliases: InterfaceAliases, routes: Vec<RouterRoute>) -> Self {
        Self { aliases, routes }
    }

    /// Normalized keys of every route on the router, tagged or not.
    pub fn keys(&self) -> HashSet<RouteKey> {
        self.routes
            .iter()
            .filter_map(|r| r.key(&self.aliases))
            .collect()
    }

    pub fn normalize(&self, key: &RouteKey) -> RouteKey {
        key.normalized(&self.aliases)
    }
}

/// Router-side identity of an observed route, suitable for a delete batch.
pub fn observed_candidate(route: &RouterRoute) -> Option<RouteCandidate> {
    let (network, mask) = route.destination()?;
    Some(RouteCandidate::new(
        network,
        mask,
        route.interface.clone(),
        route.comment.clone().unwrap_or_default(),
    ))
}

/// Splits stored rows into the first occurrence of each
/// (network, mask, interface, comment) and the extra copies.
pub fn dedup_stored(stored: Vec<Route>) -> (Vec<Route>, Vec<Route>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(stored.len());
    let mut duplicates = Vec::new();

    for route in stored {
        if seen.insert(route.identity()) {
            kept.push(route);
        } else {
            duplicates.push(route);
        }
    }

    (kept, duplicates)
}

/// Stored-versus-fresh diff for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredDiff {
    pub to_insert: Vec<RouteCandidate>,
    pub to_delete: Vec<Route>,
}

impl DesiredDiff {
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}

pub fn diff_desired(stored: &[Route], fresh: &[RouteCandidate]) -> DesiredDiff {
    let fresh_ids: HashSet<_> = fresh.iter().map(RouteCandidate::identity).collect();
    let stored_ids: HashSet<_> = stored.iter().map(Route::identity).collect();

    let to_delete = stored
        .iter()
        .filter(|r| !fresh_ids.contains(&r.identity()))
        .cloned()
        .collect();

    let mut inserted = HashSet::new();
    let to_insert = fresh
        .iter()
        .filter(|c| {
            let id = c.identity();
            !stored_ids.contains(&id) && inserted.insert(id)
        })
        .cloned()
        .collect();

    DesiredDiff {
        to_insert,
        to_delete,
    }
}

/// The two batches a push issues for one group, and the stored rows each
/// outcome applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushPlan {
    pub to_delete: Vec<RouteCandidate>,
    pub to_add: Vec<RouteCandidate>,
    /// Stored row ids behind each entry of `to_add`, in the same order.
    pub add_owners: Vec<Vec<i64>>,
    /// Unsynced stored rows whose route is already on the router.
    pub already_present: Vec<i64>,
}

impl PushPlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty() && self.already_present.is_empty()
    }
}

pub fn plan_push(
    group: &str,
    desired: &[Route],
    observed: &ObservedTable,
    delete_obsolete: bool,
) -> PushPlan {
    let desired_keys: HashSet<RouteKey> = desired
        .iter()
        .map(|r| observed.normalize(&r.key()))
        .collect();
    let observed_keys = observed.keys();

    let mut plan = PushPlan::default();

    if delete_obsolete {
        let mut queued = HashSet::new();
        for route in &observed.routes {
            let Some(key) = route.key(&observed.aliases) else {
                continue;
            };
            if route.is_tagged_for(group) && !desired_keys.contains(&key) && queued.insert(key) {
                if let Some(candidate) = observed_candidate(route) {
                    plan.to_delete.push(candidate);
                }
            }
        }
    }

    let mut positions: HashMap<RouteKey, usize> = HashMap::new();
    for route in desired {
        let key = observed.normalize(&route.key());
        if observed_keys.contains(&key) {
            if let (false, Some(id)) = (route.synced_to_router, route.id) {
                plan.already_present.push(id);
            }
            continue;
        }

        let position = *positions.entry(key).or_insert_with(|| {
            plan.to_add.push(route.to_candidate());
            plan.add_owners.push(Vec::new());
            plan.to_add.len() - 1
        });
        if let Some(id) = route.id {
            plan.add_owners[position].push(id);
        }
    }

    plan
}

/// Candidates whose normalized key is not on the router, first one per key.
pub fn missing_from_router(
    candidates: &[RouteCandidate],
    observed: &ObservedTable,
) -> Vec<RouteCandidate> {
    let mut present = observed.keys();
    candidates
        .iter()
        .filter(|c| present.insert(observed.normalize(&c.key())))
        .cloned()
        .collect()
}
