use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Outcome of one route inside a mutate batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStatus {
    pub ok: bool,
    pub message: Option<String>,
}

/// Per-route results of a single mutate RPC.
///
/// The router answers HTTP 200 even when individual routes fail, so the
/// batch is only successful when no status entry reports an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub statuses: Vec<RouteStatus>,
}

impl BatchOutcome {
    pub fn new(statuses: Vec<RouteStatus>) -> Self {
        Self { statuses }
    }

    pub fn errors(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|s| !s.ok)
            .map(|s| {
                s.message
                    .clone()
                    .unwrap_or_else(|| "route rejected without message".to_string())
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.statuses.iter().all(|s| s.ok)
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        let messages = self.errors();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(DomainError::RouterApi { messages })
        }
    }

    /// Request positions that succeeded, when statuses line up one-to-one
    /// with the `batch_len` routes sent. `None` when they cannot be mapped.
    pub fn succeeded_positions(&self, batch_len: usize) -> Option<Vec<usize>> {
        if self.statuses.len() != batch_len {
            return None;
        }
        Some(
            self.statuses
                .iter()
                .enumerate()
                .filter(|(_, s)| s.ok)
                .map(|(i, _)| i)
                .collect(),
        )
    }
}
