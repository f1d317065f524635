use db::{DbConfig, DbError, SurrealRegistry};

/// Fresh in-memory database per test; nothing is shared between runtimes.
pub async fn setup_registry() -> Result<SurrealRegistry, DbError> {
    SurrealRegistry::connect(&DbConfig::memory()).await
}
