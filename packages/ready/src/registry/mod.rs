//! Coordination registry port.
//!
//! The registry is a hierarchical, strongly consistent key-value namespace
//! shared by every scheduler instance. Each operation is expected to be
//! linearizable on its own; nothing here composes them atomically.

pub mod memory;

use std::future::Future;

use crate::error::RegistryError;

/// Storage abstraction for the coordination registry.
///
/// ## Semantics
///
/// - `persist` overwrites the node's value and creates missing ancestors with
///   empty values.
/// - `children` returns direct child names only, and an empty list when the
///   path does not exist.
/// - `remove` deletes the node with all descendants; removing an absent node
///   succeeds.
///
/// Implementations are cheap to clone so the service and the registry-backed
/// trackers can share one connection.
pub trait CoordinatorRegistry: Clone + Send + Sync + 'static {
    /// Whether a node exists at `path`.
    fn exists(&self, path: &str) -> impl Future<Output = Result<bool, RegistryError>> + Send;

    /// Value stored at `path`, `None` if the node is absent.
    fn get(&self, path: &str) -> impl Future<Output = Result<Option<String>, RegistryError>> + Send;

    /// Names of the direct children of `path`.
    fn children(&self, path: &str)
    -> impl Future<Output = Result<Vec<String>, RegistryError>> + Send;

    /// Create or overwrite the node at `path`.
    fn persist(&self, path: &str, value: &str)
    -> impl Future<Output = Result<(), RegistryError>> + Send;

    /// Delete the node at `path` and its descendants.
    fn remove(&self, path: &str) -> impl Future<Output = Result<(), RegistryError>> + Send;
}
