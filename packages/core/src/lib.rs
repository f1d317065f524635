//! Core domain types for the ready queue.
//!
//! This crate contains shared types used across all packages:
//! - JobConfiguration and JobContext for schedulable jobs
//! - UniqueJob for queue entry naming
//! - EntryLookup and EntryOutcome for resolve decisions
//! - Events for observers

mod context;
mod events;
mod job;
mod outcome;
mod unique;

pub use context::{ExecutionType, JobContext};
pub use events::ReadyEvent;
pub use job::{JobConfiguration, MAX_SHARDING_TOTAL_COUNT};
pub use outcome::{EntryLookup, EntryOutcome, SkipReason};
pub use unique::{DELIMITER, JobNameError, UniqueJob, validate_job_name};
