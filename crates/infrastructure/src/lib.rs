pub mod database;
pub mod dns;
pub mod dns_log;
mod http_error;
pub mod repositories;
pub mod router;
