use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot connect to router at {host}")]
    CannotConnect { host: String },

    #[error("Request to router at {host} timed out")]
    TimedOut { host: String },

    #[error("Cannot resolve router host {host}")]
    CannotResolveHost { host: String },

    #[error("Network error talking to {host}: {reason}")]
    Network { host: String, reason: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Router API error: {}", messages.join("; "))]
    RouterApi { messages: Vec<String> },

    #[error("Unexpected router response: {0}")]
    UnexpectedResponse(String),

    #[error("All DNS servers failed to resolve {domain}")]
    Resolution { domain: String },

    #[error("DNS query failed: {0}")]
    DnsQuery(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid domain entry: {0}")]
    InvalidDomainEntry(String),

    #[error("Invalid subnet mask: {0}")]
    InvalidMask(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True when the router could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            DomainError::CannotConnect { .. }
                | DomainError::TimedOut { .. }
                | DomainError::CannotResolveHost { .. }
                | DomainError::Network { .. }
        )
    }

    /// Per-route messages for batch failures, the display string otherwise.
    pub fn messages(&self) -> Vec<String> {
        match self {
            DomainError::RouterApi { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
