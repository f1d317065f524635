//! Configuration catalog kept in the registry.

use ready_core::{JobConfiguration, validate_job_name};

use crate::error::{ReadyError, Result};
use crate::layout::RegistryLayout;
use crate::ports::ConfigurationCatalog;
use crate::registry::CoordinatorRegistry;

/// Job configurations stored as JSON under the configuration root.
#[derive(Debug, Clone)]
pub struct RegistryConfigurationCatalog<S> {
    registry: S,
    layout: RegistryLayout,
}

impl<S: CoordinatorRegistry> RegistryConfigurationCatalog<S> {
    pub fn new(registry: S, layout: RegistryLayout) -> Self {
        Self { registry, layout }
    }

    /// Create or replace a job configuration.
    pub async fn add(&self, config: &JobConfiguration) -> Result<()> {
        validate_job_name(&config.job_name)?;
        let json = serde_json::to_string(config)?;
        self.registry
            .persist(&self.layout.config_node(&config.job_name), &json)
            .await?;
        tracing::debug!("Stored configuration of job {}", config.job_name);
        Ok(())
    }

    /// Delete a job configuration. Queued triggers of the job are collected
    /// by the next resolve pass.
    pub async fn remove(&self, job_name: &str) -> Result<()> {
        self.registry
            .remove(&self.layout.config_node(job_name))
            .await?;
        Ok(())
    }

    /// Names of all configured jobs.
    pub async fn job_names(&self) -> Result<Vec<String>> {
        Ok(self.registry.children(&self.layout.config_root()).await?)
    }
}

impl<S: CoordinatorRegistry> ConfigurationCatalog for RegistryConfigurationCatalog<S> {
    async fn load(&self, job_name: &str) -> Result<Option<JobConfiguration>> {
        let Some(json) = self.registry.get(&self.layout.config_node(job_name)).await? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| ReadyError::CorruptConfiguration {
                job_name: job_name.to_string(),
                source,
            })
    }
}
