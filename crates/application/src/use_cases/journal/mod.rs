pub mod cleanup_old_journal;
pub mod get_recent_journal;

pub use cleanup_old_journal::CleanupOldJournalUseCase;
pub use get_recent_journal::GetRecentJournalUseCase;
