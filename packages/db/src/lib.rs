//! SurrealDB integration for the ready queue.
//!
//! This crate provides database connectivity and a coordination registry
//! backed by the `node` table, so scheduler instances sharing one database
//! share one ready queue.
//!
//! # Features
//!
//! - `memory` (default): Use in-memory storage for testing
//! - `rocksdb`: Use RocksDB for persistent file-based storage

mod connection;
mod registry;
mod schema;

pub use connection::{Database, DbConfig, DbError, connect, get_db, init_db};
pub use registry::SurrealRegistry;
pub use schema::init_schema;

/// Initialize the global database with the given configuration.
///
/// This should be called once at application startup.
pub async fn init(config: DbConfig) -> Result<(), DbError> {
    let db = init_db(config).await?;
    init_schema(db).await?;
    Ok(())
}
