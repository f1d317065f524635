//! Collaborators consulted by the ready queue.
//!
//! Each port has a registry-backed implementation in [`crate::state`];
//! tests substitute their own.

use std::future::Future;

use ready_core::{JobConfiguration, JobContext, UniqueJob};

use crate::error::Result;

/// Job definitions by name.
pub trait ConfigurationCatalog: Send + Sync {
    /// Current configuration, `None` if the job was deleted or never existed.
    fn load(&self, job_name: &str) -> impl Future<Output = Result<Option<JobConfiguration>>> + Send;
}

/// Cluster-wide view of in-flight executions.
pub trait RunningTracker: Send + Sync {
    fn is_running(&self, job_name: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Record of triggers deferred because their job was running.
pub trait MisfireTracker: Send + Sync {
    fn add(&self, job_name: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Dispatch-time exclusivity.
///
/// Resolving a job as "not running" does not stop another scheduler from
/// starting it before this one dispatches. A claim is the hook where a
/// deployment makes that exclusive; denied entries stay queued.
pub trait DispatchClaim: Send + Sync {
    fn claim(
        &self,
        entry: &UniqueJob,
        context: &JobContext,
    ) -> impl Future<Output = Result<bool>> + Send;
}

/// Claim that grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unclaimed;

impl DispatchClaim for Unclaimed {
    async fn claim(&self, _entry: &UniqueJob, _context: &JobContext) -> Result<bool> {
        Ok(true)
    }
}
