//! Job context: a job ready to run now.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::JobConfiguration;

/// Why a context exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionType {
    /// Produced from a queued trigger.
    #[default]
    Ready,
    /// Re-dispatch of shards lost by a failed executor.
    Failover,
}

impl std::fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionType::Ready => write!(f, "ready"),
            ExecutionType::Failover => write!(f, "failover"),
        }
    }
}

/// Derived, non-persisted value handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_config: JobConfiguration,
    pub assigned_sharding_items: Vec<u32>,
    pub execution_type: ExecutionType,
    pub created_at: DateTime<Utc>,
}

impl JobContext {
    /// Ready context covering every sharding item of the job.
    pub fn from_config(job_config: JobConfiguration) -> Self {
        let assigned_sharding_items = job_config.sharding_items();
        Self {
            job_config,
            assigned_sharding_items,
            execution_type: ExecutionType::Ready,
            created_at: Utc::now(),
        }
    }

    /// Failover context for a subset of sharding items.
    pub fn failover(job_config: JobConfiguration, sharding_items: Vec<u32>) -> Self {
        Self {
            job_config,
            assigned_sharding_items: sharding_items,
            execution_type: ExecutionType::Failover,
            created_at: Utc::now(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_config.job_name
    }
}
