#![cfg(test)]
use std::sync::Arc;

use crate::store::{DocumentStore, MemoryStore, SeaOrmStore};

pub fn memory_store() -> Arc<dyn DocumentStore> {
    Arc::new(MemoryStore::new())
}

/// Postgres store from `DATABASE_URL`; callers skip when it is unset or `SKIP_DB_TESTS` is set.
pub async fn pg_store() -> Result<SeaOrmStore, anyhow::Error> {
    let mut cfg = configs::DatabaseConfig::default();
    cfg.url = std::env::var("DATABASE_URL")?;
    if let Ok(name) = std::env::var("DB_NAME") {
        cfg.name = name;
    }
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);
    Ok(SeaOrmStore::connect(&cfg).await?)
}
