pub mod cleanup_obsolete;
pub mod full_sync;
pub mod generate_desired_routes;
pub mod list_router_routes;
pub mod push_to_router;
pub mod reconcile_from_router;

pub use cleanup_obsolete::CleanupObsoleteUseCase;
pub use full_sync::FullSyncUseCase;
pub use generate_desired_routes::{GenerateDesiredRoutesUseCase, GenerationOutcome};
pub use list_router_routes::{AnnotatedRoute, ListRouterRoutesUseCase};
pub use push_to_router::{PushOutcome, PushToRouterUseCase};
pub use reconcile_from_router::ReconcileFromRouterUseCase;
