//! Database schema definitions using SurrealQL.

use crate::{Database, DbError};

/// Initialize the registry schema.
///
/// Safe to run repeatedly; every definition is `IF NOT EXISTS`.
pub async fn init_schema(db: &Database) -> Result<(), DbError> {
    tracing::info!("Initializing registry schema...");

    db.query(NODE_SCHEMA).await?.check()?;

    tracing::info!("Registry schema initialized");

    Ok(())
}

/// Node table schema.
///
/// One record per registry node, keyed by its absolute path. `parent` makes
/// child listing a single indexed lookup.
const NODE_SCHEMA: &str = r#"
-- Node table for the coordination registry
DEFINE TABLE IF NOT EXISTS node SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS path ON node TYPE string;
DEFINE FIELD IF NOT EXISTS parent ON node TYPE string;
DEFINE FIELD IF NOT EXISTS name ON node TYPE string;
DEFINE FIELD IF NOT EXISTS value ON node TYPE string DEFAULT "";
DEFINE FIELD IF NOT EXISTS updated_at ON node TYPE datetime DEFAULT time::now();

-- Indexes for path lookups and child listing
DEFINE INDEX IF NOT EXISTS node_path ON node FIELDS path UNIQUE;
DEFINE INDEX IF NOT EXISTS node_parent ON node FIELDS parent;
"#;
