mod entry;
pub mod file_source;
pub mod http_source;

pub use file_source::FileDnsLogSource;
pub use http_source::HttpDnsLogSource;
