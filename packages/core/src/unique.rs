//! Unique queue entry naming.
//!
//! A ready namespace only holds unique keys, yet one job may have several
//! pending triggers. Each trigger is stored under
//! `<job_name>@-@<token>`, where the token is a fresh ULID, so triggers of the
//! same job coexist instead of overwriting each other. The job name is
//! recovered by cutting at the first delimiter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

/// Separator between job name and token in a unique name.
pub const DELIMITER: &str = "@-@";

/// Rejected job names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobNameError {
    #[error("Job name must not be empty")]
    Empty,
    #[error("Job name {name:?} must not contain {fragment:?}")]
    Reserved { name: String, fragment: &'static str },
}

/// Check that a job name can be encoded into a unique name and a node path.
pub fn validate_job_name(job_name: &str) -> Result<(), JobNameError> {
    if job_name.is_empty() {
        return Err(JobNameError::Empty);
    }
    for fragment in [DELIMITER, "/"] {
        if job_name.contains(fragment) {
            return Err(JobNameError::Reserved {
                name: job_name.to_string(),
                fragment,
            });
        }
    }
    Ok(())
}

/// One trigger occurrence of a job: `(job_name, token)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueJob {
    job_name: String,
    unique_name: String,
}

impl UniqueJob {
    /// Create a fresh entry for a job.
    pub fn new(job_name: impl Into<String>) -> Result<Self, JobNameError> {
        let job_name = job_name.into();
        validate_job_name(&job_name)?;
        let unique_name = format!("{}{}{}", job_name, DELIMITER, Ulid::new());
        Ok(Self {
            job_name,
            unique_name,
        })
    }

    /// Decode a unique name read back from the ready namespace.
    ///
    /// Never fails: a name without delimiter is taken as a bare job name
    /// with an empty token. The encoded name is kept verbatim.
    pub fn parse(unique_name: &str) -> Self {
        let job_name = unique_name
            .split_once(DELIMITER)
            .map_or(unique_name, |(job_name, _)| job_name);
        Self {
            job_name: job_name.to_string(),
            unique_name: unique_name.to_string(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// The distinguishing suffix, empty for bare names.
    pub fn token(&self) -> &str {
        self.unique_name
            .split_once(DELIMITER)
            .map_or("", |(_, token)| token)
    }

    /// The encoded node name.
    pub fn unique_name(&self) -> &str {
        &self.unique_name
    }
}

impl std::fmt::Display for UniqueJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.unique_name)
    }
}
