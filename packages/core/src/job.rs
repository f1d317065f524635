//! Job configuration as stored in the configuration catalog.

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on shards per job. Stored configurations above it fail to load.
pub const MAX_SHARDING_TOTAL_COUNT: u32 = 10_000;

/// Definition of a schedulable job.
///
/// Stored as JSON by the configuration catalog. The ready queue only needs the
/// job name and sharding total count; the remaining fields travel with the
/// job context to the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfiguration {
    /// Logical job name, stable across triggers.
    pub job_name: String,
    /// Cron expression driving the job's triggers.
    pub cron: String,
    /// Number of shards a single execution is split into.
    #[serde(deserialize_with = "bounded_sharding_total_count")]
    pub sharding_total_count: u32,
    /// CPU units reserved per shard.
    #[serde(default = "default_cpu_count")]
    pub cpu_count: f64,
    /// Memory reserved per shard, in megabytes.
    #[serde(default = "default_memory_mb")]
    pub memory_mb: f64,
    /// Free-form parameter handed to every shard.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_parameter: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn bounded_sharding_total_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = u32::deserialize(deserializer)?;
    if count > MAX_SHARDING_TOTAL_COUNT {
        return Err(serde::de::Error::custom(format!(
            "sharding_total_count {} exceeds {}",
            count, MAX_SHARDING_TOTAL_COUNT
        )));
    }
    Ok(count)
}

fn default_cpu_count() -> f64 {
    1.0
}

fn default_memory_mb() -> f64 {
    128.0
}

impl JobConfiguration {
    /// Create a configuration with default resources.
    ///
    /// The sharding total count is clamped to `1..=MAX_SHARDING_TOTAL_COUNT`.
    pub fn new(job_name: impl Into<String>, cron: impl Into<String>, sharding_total_count: u32) -> Self {
        Self {
            job_name: job_name.into(),
            cron: cron.into(),
            sharding_total_count: sharding_total_count.clamp(1, MAX_SHARDING_TOTAL_COUNT),
            cpu_count: default_cpu_count(),
            memory_mb: default_memory_mb(),
            job_parameter: String::new(),
            description: None,
        }
    }

    /// Set the per-shard resources.
    pub fn with_resources(mut self, cpu_count: f64, memory_mb: f64) -> Self {
        self.cpu_count = cpu_count;
        self.memory_mb = memory_mb;
        self
    }

    /// Set the job parameter.
    pub fn with_parameter(mut self, job_parameter: impl Into<String>) -> Self {
        self.job_parameter = job_parameter.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// All sharding items of this job, `0..sharding_total_count`.
    pub fn sharding_items(&self) -> Vec<u32> {
        (0..self.sharding_total_count.clamp(1, MAX_SHARDING_TOTAL_COUNT)).collect()
    }
}
