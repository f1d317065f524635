//! SurrealDB-backed coordination registry.

use ready_queue::layout::{ancestors, split, validate_path};
use ready_queue::{CoordinatorRegistry, RegistryError};
use serde::Deserialize;

use crate::{Database, DbConfig, DbError, connect, get_db, init_schema};

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct NodeRecord {
    value: String,
}

/// Fields bound when writing a node.
#[derive(Debug, Clone)]
struct NodeWrite {
    path: String,
    parent: String,
    name: String,
    value: String,
}

impl NodeWrite {
    fn new(path: &str, value: &str) -> Result<Self, RegistryError> {
        let (parent, name) =
            split(path).ok_or_else(|| RegistryError::InvalidPath(path.to_string()))?;
        Ok(Self {
            path: path.to_string(),
            parent: parent.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct NameRow {
    name: String,
}

/// Registry nodes stored in the `node` table, one record per path.
///
/// Clones share the underlying connection.
#[derive(Clone)]
pub struct SurrealRegistry {
    db: Database,
}

impl From<DbError> for RegistryError {
    fn from(err: DbError) -> Self {
        RegistryError::Unavailable(err.to_string())
    }
}

fn operation_err(path: &str, err: surrealdb::Error) -> RegistryError {
    RegistryError::Operation {
        path: path.to_string(),
        message: err.to_string(),
    }
}

impl SurrealRegistry {
    /// Wrap an existing connection. The schema must already be initialized.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open a dedicated connection and initialize the schema.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let db = connect(config).await?;
        init_schema(&db).await?;
        Ok(Self { db })
    }

    /// Registry on the global connection set up by [`crate::init`].
    pub fn global() -> Result<Self, DbError> {
        Ok(Self::new(get_db()?.clone()))
    }

    async fn select(&self, path: &str) -> Result<Option<NodeRecord>, RegistryError> {
        validate_path(path)?;
        self.db
            .select(("node", path.to_string()))
            .await
            .map_err(|e| operation_err(path, e))
    }
}

impl CoordinatorRegistry for SurrealRegistry {
    async fn exists(&self, path: &str) -> Result<bool, RegistryError> {
        Ok(self.select(path).await?.is_some())
    }

    async fn get(&self, path: &str) -> Result<Option<String>, RegistryError> {
        Ok(self.select(path).await?.map(|record| record.value))
    }

    async fn children(&self, path: &str) -> Result<Vec<String>, RegistryError> {
        validate_path(path)?;
        let mut result = self
            .db
            .query("SELECT name FROM node WHERE parent = $parent")
            .bind(("parent", path.to_string()))
            .await
            .map_err(|e| operation_err(path, e))?;

        let rows: Vec<NameRow> = result.take(0).map_err(|e| operation_err(path, e))?;

        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    async fn persist(&self, path: &str, value: &str) -> Result<(), RegistryError> {
        validate_path(path)?;
        let node = NodeWrite::new(path, value)?;

        // Ancestors keep whatever value they already hold.
        for ancestor in ancestors(path) {
            let parent = NodeWrite::new(ancestor, "")?;
            self.db
                .query("INSERT IGNORE INTO node { id: $path, path: $path, parent: $parent, name: $name, value: '' }")
                .bind(("path", parent.path))
                .bind(("parent", parent.parent))
                .bind(("name", parent.name))
                .await
                .and_then(|response| response.check())
                .map_err(|e| operation_err(ancestor, e))?;
        }

        // Merge into an existing record rather than replacing it.
        self.db
            .query(
                "UPSERT type::thing('node', $path) \
                 SET path = $path, parent = $parent, name = $name, value = $value, updated_at = time::now()",
            )
            .bind(("path", node.path))
            .bind(("parent", node.parent))
            .bind(("name", node.name))
            .bind(("value", node.value))
            .await
            .and_then(|response| response.check())
            .map_err(|e| operation_err(path, e))?;

        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), RegistryError> {
        validate_path(path)?;
        let prefix = format!("{}/", path.trim_end_matches('/'));

        self.db
            .query("DELETE node WHERE path = $path OR string::starts_with(path, $prefix)")
            .bind(("path", path.to_string()))
            .bind(("prefix", prefix))
            .await
            .and_then(|response| response.check())
            .map_err(|e| operation_err(path, e))?;

        Ok(())
    }
}
