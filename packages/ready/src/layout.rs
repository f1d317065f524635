//! Node layout of the coordination registry.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Where each component keeps its nodes.
///
/// All roots are absolute paths. A non-empty namespace is prefixed to every
/// root so several schedulers can share one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryLayout {
    /// Optional prefix such as `/scheduler-a`.
    pub namespace: String,
    /// Queued triggers, one child per unique entry.
    pub ready_root: String,
    /// Job configurations, one child per job holding JSON.
    pub config_root: String,
    /// Running executions, one child per job with one child per task.
    pub running_root: String,
    /// Misfired jobs, one child per job.
    pub misfired_root: String,
}

impl Default for RegistryLayout {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            ready_root: "/state/ready".to_string(),
            config_root: "/config/job".to_string(),
            running_root: "/state/running".to_string(),
            misfired_root: "/state/misfired".to_string(),
        }
    }
}

impl RegistryLayout {
    /// Set the namespace prefix.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into().trim_end_matches('/').to_string();
        self
    }

    fn rooted(&self, root: &str) -> String {
        format!("{}{}", self.namespace, root)
    }

    pub fn ready_root(&self) -> String {
        self.rooted(&self.ready_root)
    }

    pub fn ready_node(&self, unique_name: &str) -> String {
        join(&self.ready_root(), unique_name)
    }

    pub fn config_root(&self) -> String {
        self.rooted(&self.config_root)
    }

    pub fn config_node(&self, job_name: &str) -> String {
        join(&self.config_root(), job_name)
    }

    pub fn running_root(&self) -> String {
        self.rooted(&self.running_root)
    }

    pub fn running_node(&self, job_name: &str) -> String {
        join(&self.running_root(), job_name)
    }

    pub fn running_task_node(&self, job_name: &str, task_id: &str) -> String {
        join(&self.running_node(job_name), task_id)
    }

    pub fn misfired_root(&self) -> String {
        self.rooted(&self.misfired_root)
    }

    pub fn misfired_node(&self, job_name: &str) -> String {
        join(&self.misfired_root(), job_name)
    }
}

/// Append a child name to a parent path.
pub fn join(parent: &str, child: &str) -> String {
    if parent == "/" {
        format!("/{}", child)
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Check that a path is absolute, has no empty segments and no trailing slash.
pub fn validate_path(path: &str) -> Result<(), RegistryError> {
    let valid = path == "/"
        || (path.starts_with('/') && path[1..].split('/').all(|segment| !segment.is_empty()));
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidPath(path.to_string()))
    }
}

/// Split a path into parent and last segment. The root has no parent.
pub fn split(path: &str) -> Option<(&str, &str)> {
    let idx = path.rfind('/')?;
    let name = &path[idx + 1..];
    if name.is_empty() {
        return None;
    }
    let parent = if idx == 0 { "/" } else { &path[..idx] };
    Some((parent, name))
}

/// All proper ancestors of a path, outermost first, excluding the root.
pub fn ancestors(path: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut current = path;
    while let Some((parent, _)) = split(current) {
        if parent == "/" {
            break;
        }
        result.push(parent);
        current = parent;
    }
    result.reverse();
    result
}
