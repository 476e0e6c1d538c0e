pub mod auth;
pub mod client;
pub mod cookie_store;
pub mod gateway;
pub mod rci;

pub use client::RouterClient;
pub use cookie_store::PersistentCookieStore;
pub use gateway::KeeneticRouterGateway;
