//! Route Sync Application Layer
//!
//! Ports (async traits implemented by the infrastructure crate) and the use
//! cases that drive resolution, reconciliation and the DNS activity watcher.
pub mod ports;
pub mod services;
pub mod use_cases;
