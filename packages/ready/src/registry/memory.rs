//! In-memory registry implementation.
//!
//! [`MemoryRegistry`] keeps every node in one ordered map behind a lock.
//! Clones share the same map, so several services built on clones behave
//! like scheduler instances talking to one store. Not durable and not shared
//! across processes.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::CoordinatorRegistry;
use crate::error::RegistryError;
use crate::layout::{ancestors, split, validate_path};

/// Thread-safe in-process registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    nodes: Arc<RwLock<BTreeMap<String, String>>>,
}

fn poison_err<T>(_: PoisonError<T>) -> RegistryError {
    RegistryError::LockPoisoned
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.read().map(|nodes| nodes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CoordinatorRegistry for MemoryRegistry {
    async fn exists(&self, path: &str) -> Result<bool, RegistryError> {
        validate_path(path)?;
        let nodes = self.nodes.read().map_err(poison_err)?;
        Ok(nodes.contains_key(path))
    }

    async fn get(&self, path: &str) -> Result<Option<String>, RegistryError> {
        validate_path(path)?;
        let nodes = self.nodes.read().map_err(poison_err)?;
        Ok(nodes.get(path).cloned())
    }

    async fn children(&self, path: &str) -> Result<Vec<String>, RegistryError> {
        validate_path(path)?;
        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{}/", path)
        };
        let nodes = self.nodes.read().map_err(poison_err)?;
        Ok(nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, _)| match split(key) {
                Some((parent, name)) if parent == path => Some(name.to_string()),
                _ => None,
            })
            .collect())
    }

    async fn persist(&self, path: &str, value: &str) -> Result<(), RegistryError> {
        validate_path(path)?;
        if path == "/" {
            return Err(RegistryError::InvalidPath(path.to_string()));
        }
        let mut nodes = self.nodes.write().map_err(poison_err)?;
        for ancestor in ancestors(path) {
            nodes.entry(ancestor.to_string()).or_default();
        }
        nodes.insert(path.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), RegistryError> {
        validate_path(path)?;
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut nodes = self.nodes.write().map_err(poison_err)?;
        nodes.remove(path);
        let descendants: Vec<String> = nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in descendants {
            nodes.remove(&key);
        }
        Ok(())
    }
}
