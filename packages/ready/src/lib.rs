//! Ready queue reconciliation for a distributed job scheduler.
//!
//! Scheduler instances enqueue a trigger whenever a job fires, resolve the
//! queue once per scheduling pass to get the entries eligible for dispatch,
//! and remove the entries they dispatched. All coordination goes through a
//! shared [`CoordinatorRegistry`]; nothing is locked in process.
//!
//! # Resolve pass
//!
//! For every queued entry:
//!
//! - configuration missing: the entry is deleted (lazy garbage collection)
//! - job running: a misfire is recorded, the entry stays queued
//! - job already selected this pass, or excluded by the caller: entry stays
//! - otherwise: the entry is returned with a fresh [`JobContext`]
//!
//! # Usage
//!
//! ```ignore
//! use ready_queue::{MemoryRegistry, ReadyService, RegistryLayout};
//!
//! let service = ReadyService::from_registry(MemoryRegistry::new(), RegistryLayout::default());
//! service.enqueue("report").await?;
//! let eligible = service.resolve(&[]).await?;
//! // dispatch...
//! service.remove(eligible.keys()).await?;
//! ```
//!
//! [`JobContext`]: ready_core::JobContext

mod error;
pub mod layout;
mod plan;
mod ports;
pub mod registry;
mod service;
pub mod state;

pub use error::{ReadyError, RegistryError, Result};
pub use layout::RegistryLayout;
pub use plan::ResolutionPlan;
pub use ports::{ConfigurationCatalog, DispatchClaim, MisfireTracker, RunningTracker, Unclaimed};
pub use registry::CoordinatorRegistry;
pub use registry::memory::MemoryRegistry;
pub use service::{EligibleJobs, ReadyService, RegistryReadyService};
pub use state::{RegistryConfigurationCatalog, RegistryMisfireTracker, RegistryRunningTracker};
