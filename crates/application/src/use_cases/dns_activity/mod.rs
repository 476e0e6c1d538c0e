pub mod process_dns_activity;

pub use process_dns_activity::{ActivityOutcome, ProcessDnsActivityUseCase};
