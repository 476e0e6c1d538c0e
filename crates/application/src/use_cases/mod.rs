pub mod dns_activity;
pub mod journal;
pub mod routes;

pub use dns_activity::{ActivityOutcome, ProcessDnsActivityUseCase};
pub use journal::{CleanupOldJournalUseCase, GetRecentJournalUseCase};
pub use routes::{
    AnnotatedRoute, CleanupObsoleteUseCase, FullSyncUseCase, GenerateDesiredRoutesUseCase,
    GenerationOutcome, ListRouterRoutesUseCase, PushOutcome, PushToRouterUseCase,
    ReconcileFromRouterUseCase,
};
