use route_sync_domain::DomainError;
use std::error::Error as _;

/// Maps a failed request onto the connectivity taxonomy, naming `host`.
pub(crate) fn classify(error: &reqwest::Error, host: &str) -> DomainError {
    let host = host.to_string();

    if error.is_timeout() {
        return DomainError::TimedOut { host };
    }

    if error.is_connect() {
        if is_dns_failure(error) {
            return DomainError::CannotResolveHost { host };
        }
        return DomainError::CannotConnect { host };
    }

    DomainError::Network {
        host,
        reason: error.to_string(),
    }
}

fn is_dns_failure(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(inner) = source {
        let text = inner.to_string().to_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("no such host")
        {
            return true;
        }
        source = inner.source();
    }
    false
}
