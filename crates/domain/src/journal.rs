use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    Processed,
    Added,
    Error,
    Skipped,
}

impl JournalStatus {
    pub fn to_str(&self) -> &'static str {
        match self {
            JournalStatus::Processed => "processed",
            JournalStatus::Added => "added",
            JournalStatus::Error => "error",
            JournalStatus::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processed" => Some(JournalStatus::Processed),
            "added" => Some(JournalStatus::Added),
            "error" => Some(JournalStatus::Error),
            "skipped" => Some(JournalStatus::Skipped),
            _ => None,
        }
    }
}

impl fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

/// Append-only record of a DNS trigger or sync outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Option<i64>,
    pub domain: String,
    pub group_name: Option<String>,
    pub status: JournalStatus,
    pub message: Option<String>,
    pub created_at: Option<String>,
}

impl JournalEntry {
    pub fn new(
        domain: impl Into<String>,
        group_name: Option<&str>,
        status: JournalStatus,
        message: Option<String>,
    ) -> Self {
        Self {
            id: None,
            domain: domain.into(),
            group_name: group_name.map(str::to_string),
            status,
            message,
            created_at: None,
        }
    }
}
