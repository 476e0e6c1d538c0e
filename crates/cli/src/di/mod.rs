mod repositories;
mod router;
mod use_cases;

pub use repositories::Repositories;
pub use router::RouterServices;
pub use use_cases::UseCases;
