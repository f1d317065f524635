//! Per-pass decision logic, free of I/O.

use std::collections::HashSet;

use ready_core::{EntryLookup, EntryOutcome, JobContext, SkipReason};

/// Decides the outcome of each queued entry within one resolve pass.
///
/// Holds the caller's exclusion set and the jobs already selected in the
/// pass; at most one entry per job is ever selected.
#[derive(Debug, Default)]
pub struct ResolutionPlan {
    excluded: HashSet<String>,
    selected: HashSet<String>,
}

impl ResolutionPlan {
    /// Plan excluding the jobs of the given contexts.
    pub fn new<'a>(ineligible: impl IntoIterator<Item = &'a JobContext>) -> Self {
        Self {
            excluded: ineligible
                .into_iter()
                .map(|context| context.job_name().to_string())
                .collect(),
            selected: HashSet::new(),
        }
    }

    pub fn is_excluded(&self, job_name: &str) -> bool {
        self.excluded.contains(job_name)
    }

    /// Outcome for one entry of `job_name`.
    ///
    /// Missing configuration wins over everything, then a running job, then
    /// deduplication and exclusion.
    pub fn decide(&mut self, job_name: &str, lookup: EntryLookup) -> EntryOutcome {
        match lookup {
            EntryLookup::Missing => EntryOutcome::Collected,
            EntryLookup::Running => EntryOutcome::Deferred,
            EntryLookup::Idle(_) if self.selected.contains(job_name) => {
                EntryOutcome::Skipped(SkipReason::Duplicate)
            }
            EntryLookup::Idle(_) if self.excluded.contains(job_name) => {
                EntryOutcome::Skipped(SkipReason::Ineligible)
            }
            EntryLookup::Idle(config) => {
                self.selected.insert(job_name.to_string());
                EntryOutcome::Selected(JobContext::from_config(config))
            }
        }
    }
}
