//! Misfire tracker kept in the registry.

use crate::error::Result;
use crate::layout::RegistryLayout;
use crate::ports::MisfireTracker;
use crate::registry::CoordinatorRegistry;

/// One node per misfired job. Repeated misfires of a job collapse into one
/// node; the reconciler re-runs the job once.
#[derive(Debug, Clone)]
pub struct RegistryMisfireTracker<S> {
    registry: S,
    layout: RegistryLayout,
}

impl<S: CoordinatorRegistry> RegistryMisfireTracker<S> {
    pub fn new(registry: S, layout: RegistryLayout) -> Self {
        Self { registry, layout }
    }

    /// Jobs with a pending misfire.
    pub async fn misfired_jobs(&self) -> Result<Vec<String>> {
        Ok(self.registry.children(&self.layout.misfired_root()).await?)
    }

    /// Clear the misfire of a job once it has been re-run.
    pub async fn remove(&self, job_name: &str) -> Result<()> {
        self.registry
            .remove(&self.layout.misfired_node(job_name))
            .await?;
        Ok(())
    }
}

impl<S: CoordinatorRegistry> MisfireTracker for RegistryMisfireTracker<S> {
    async fn add(&self, job_name: &str) -> Result<()> {
        let node = self.layout.misfired_node(job_name);
        if !self.registry.exists(&node).await? {
            self.registry.persist(&node, "").await?;
            tracing::debug!("Recorded misfire of job {}", job_name);
        }
        Ok(())
    }
}
