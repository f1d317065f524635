//! Per-entry outcome of a resolve pass.

use serde::{Deserialize, Serialize};

use crate::JobContext;

/// What a resolve pass found out about one job.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryLookup {
    /// No configuration in the catalog.
    Missing,
    /// Configured, with an execution in flight.
    Running,
    /// Configured and idle.
    Idle(crate::JobConfiguration),
}

/// Why a queued entry was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Another entry of the same job was already selected in this pass.
    Duplicate,
    /// The caller declared the job ineligible for this pass.
    Ineligible,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Duplicate => write!(f, "duplicate"),
            SkipReason::Ineligible => write!(f, "ineligible"),
        }
    }
}

/// Decision taken for one queued entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// Orphaned entry deleted from the queue.
    Collected,
    /// Job running; misfire recorded, entry kept.
    Deferred,
    /// Entry kept for a later pass.
    Skipped(SkipReason),
    /// Entry eligible for dispatch.
    Selected(JobContext),
}
