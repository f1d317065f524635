//! Error types for the ready queue.

use ready_core::JobNameError;
use thiserror::Error;

/// Failures of the coordination registry.
///
/// These are never retried or masked by this crate; they surface to the
/// caller of the scheduling pass.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry unavailable: {0}")]
    Unavailable(String),
    #[error("Registry operation on {path} failed: {message}")]
    Operation { path: String, message: String },
    #[error("Invalid node path: {0}")]
    InvalidPath(String),
    #[error("Registry lock poisoned")]
    LockPoisoned,
}

/// Errors returned by the ready queue service and its ports.
#[derive(Debug, Error)]
pub enum ReadyError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Invalid job name: {0}")]
    InvalidJobName(#[from] JobNameError),
    #[error("Configuration of job {job_name} is corrupt: {source}")]
    CorruptConfiguration {
        job_name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = ReadyError> = std::result::Result<T, E>;
