//! Running tracker kept in the registry.

use crate::error::Result;
use crate::layout::RegistryLayout;
use crate::ports::RunningTracker;
use crate::registry::CoordinatorRegistry;

/// One node per running job, with one child per in-flight task.
#[derive(Debug, Clone)]
pub struct RegistryRunningTracker<S> {
    registry: S,
    layout: RegistryLayout,
}

impl<S: CoordinatorRegistry> RegistryRunningTracker<S> {
    pub fn new(registry: S, layout: RegistryLayout) -> Self {
        Self { registry, layout }
    }

    /// Mark a task of the job as in flight.
    pub async fn add(&self, job_name: &str, task_id: &str) -> Result<()> {
        self.registry
            .persist(&self.layout.running_task_node(job_name, task_id), "")
            .await?;
        Ok(())
    }

    /// Mark a task as finished. The job node goes away with its last task.
    pub async fn remove(&self, job_name: &str, task_id: &str) -> Result<()> {
        self.registry
            .remove(&self.layout.running_task_node(job_name, task_id))
            .await?;
        let job_node = self.layout.running_node(job_name);
        if self.registry.children(&job_node).await?.is_empty() {
            self.registry.remove(&job_node).await?;
        }
        Ok(())
    }

    /// Task ids currently in flight for the job.
    pub async fn running_tasks(&self, job_name: &str) -> Result<Vec<String>> {
        Ok(self
            .registry
            .children(&self.layout.running_node(job_name))
            .await?)
    }
}

impl<S: CoordinatorRegistry> RunningTracker for RegistryRunningTracker<S> {
    async fn is_running(&self, job_name: &str) -> Result<bool> {
        let job_node = self.layout.running_node(job_name);
        if !self.registry.exists(&job_node).await? {
            return Ok(false);
        }
        Ok(!self.registry.children(&job_node).await?.is_empty())
    }
}
