use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStage {
    Generate,
    Push,
    Cleanup,
    Reconcile,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStage::Generate => "generate",
            SyncStage::Push => "push",
            SyncStage::Cleanup => "cleanup",
            SyncStage::Reconcile => "reconcile",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSyncResult {
    pub group: String,
    pub stage: SyncStage,
    pub success: bool,
    pub message: String,
}

/// Per-group results of a fleet-wide operation. One group's failure never
/// hides another group's result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub results: Vec<GroupSyncResult>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ok(&mut self, group: &str, stage: SyncStage, message: impl Into<String>) {
        self.results.push(GroupSyncResult {
            group: group.to_string(),
            stage,
            success: true,
            message: message.into(),
        });
    }

    pub fn record_err(&mut self, group: &str, stage: SyncStage, message: impl Into<String>) {
        self.results.push(GroupSyncResult {
            group: group.to_string(),
            stage,
            success: false,
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: SyncReport) {
        self.results.extend(other.results);
    }

    pub fn failures(&self) -> impl Iterator<Item = &GroupSyncResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}
