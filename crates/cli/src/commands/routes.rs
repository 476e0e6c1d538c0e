use crate::di::{Repositories, UseCases};
use route_sync_application::ports::DomainGroupRepository;
use route_sync_domain::{netmask, DomainGroup, SyncReport, SyncStage};
use tracing::{error, info};

pub async fn sync(use_cases: &UseCases) -> anyhow::Result<()> {
    let report = use_cases.full_sync.execute().await?;
    finish(report)
}

pub async fn generate(
    use_cases: &UseCases,
    repos: &Repositories,
    group: Option<&str>,
) -> anyhow::Result<()> {
    let mut report = SyncReport::new();
    for group in selected_groups(repos, group).await? {
        match use_cases.generate.execute(&group).await {
            Ok(outcome) => {
                info!(
                    group = %group.name,
                    inserted = outcome.inserted,
                    deleted = outcome.deleted,
                    duplicates_removed = outcome.duplicates_removed,
                    "Desired routes generated"
                );
                report.record_ok(
                    &group.name,
                    SyncStage::Generate,
                    format!("{} inserted, {} deleted", outcome.inserted, outcome.deleted),
                );
            }
            Err(e) => report.record_err(
                &group.name,
                SyncStage::Generate,
                e.to_string(),
            ),
        }
    }
    finish(report)
}

pub async fn push(
    use_cases: &UseCases,
    repos: &Repositories,
    group: Option<&str>,
) -> anyhow::Result<()> {
    let mut report = SyncReport::new();
    for group in selected_groups(repos, group).await? {
        match use_cases.push.execute(&group).await {
            Ok(outcome) => report.record_ok(
                &group.name,
                SyncStage::Push,
                format!(
                    "{} added, {} deleted, {} marked synced",
                    outcome.added, outcome.deleted, outcome.marked_synced
                ),
            ),
            Err(e) => report.record_err(
                &group.name,
                SyncStage::Push,
                e.messages().join("; "),
            ),
        }
    }
    finish(report)
}

pub async fn cleanup(use_cases: &UseCases) -> anyhow::Result<()> {
    finish(use_cases.cleanup.execute().await?)
}

pub async fn reconcile(use_cases: &UseCases) -> anyhow::Result<()> {
    finish(use_cases.reconcile.execute().await?)
}

pub async fn list_routes(use_cases: &UseCases) -> anyhow::Result<()> {
    let routes = use_cases.list_routes.execute().await?;

    for annotated in &routes {
        let route = &annotated.route;
        let destination = match route.destination() {
            Some((network, mask)) => match netmask::mask_to_prefix(mask) {
                Ok(prefix) => format!("{}/{}", network, prefix),
                Err(_) => format!("{}/{}", network, mask),
            },
            None => "?".to_string(),
        };
        println!(
            "{:<20} {:<16} {:<12} {}",
            destination,
            annotated.interface_id,
            annotated.group.as_deref().unwrap_or("-"),
            route.comment.as_deref().unwrap_or(""),
        );
    }
    println!("{} route(s)", routes.len());
    Ok(())
}

async fn selected_groups(
    repos: &Repositories,
    name: Option<&str>,
) -> anyhow::Result<Vec<DomainGroup>> {
    match name {
        Some(name) => match repos.groups.get_by_name(name).await? {
            Some(group) => Ok(vec![group]),
            None => anyhow::bail!("group '{}' not found", name),
        },
        None => Ok(repos.groups.get_all().await?),
    }
}

/// Prints one line per result and fails when any stage failed.
fn finish(report: SyncReport) -> anyhow::Result<()> {
    for result in &report.results {
        println!(
            "{:<4} {:<10} {:<16} {}",
            if result.success { "ok" } else { "FAIL" },
            result.stage,
            result.group,
            result.message
        );
    }

    let failures = report.failures().count();
    if failures > 0 {
        error!(failures, "Some group stages failed");
        anyhow::bail!("{} group stage(s) failed", failures);
    }
    Ok(())
}
