use crate::di::UseCases;

pub async fn journal(use_cases: &UseCases, limit: u32) -> anyhow::Result<()> {
    let entries = use_cases.get_journal.execute(limit).await?;

    for entry in &entries {
        println!(
            "{:<20} {:<9} {:<32} {:<12} {}",
            entry.created_at.as_deref().unwrap_or("-"),
            entry.status,
            entry.domain,
            entry.group_name.as_deref().unwrap_or("-"),
            entry.message.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}
