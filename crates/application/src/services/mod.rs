pub mod monitored_domains;
pub mod route_diff;
pub mod route_resolver;
pub mod router_lease;

pub use monitored_domains::{find_matches, DomainMatch, MonitoredDomains, MonitoredGroup};
pub use route_diff::{
    dedup_stored, diff_desired, missing_from_router, observed_candidate, plan_push, DesiredDiff,
    ObservedTable, PushPlan,
};
pub use route_resolver::RouteResolver;
pub use router_lease::RouterLease;
