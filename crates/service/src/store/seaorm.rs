//! Postgres backend: one `(id text, doc jsonb)` table per collection inside the configured schema.

use std::time::Duration;

use async_trait::async_trait;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::{Collection, INDEXES};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, SqlErr, Statement};
use serde_json::Value;
use tracing::{info, instrument};

use super::{Document, DocumentStore, Filter, FindOptions, StoreError, ID_FIELD};

pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Connect, create the schema if needed and run pending migrations.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut opt = ConnectOptions::new(cfg.url.clone());
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
            .sqlx_logging(cfg.sqlx_logging)
            .set_schema_search_path(cfg.name.clone());

        let db = Database::connect(opt).await.map_err(db_err)?;
        // name is restricted to [A-Za-z0-9_] by config validation
        db.execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", cfg.name))
            .await
            .map_err(db_err)?;
        migration::Migrator::up(&db, None).await.map_err(db_err)?;
        info!(schema = %cfg.name, "postgres document store ready");
        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self { Self { db } }

    fn stmt(sql: String, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

fn db_err(e: DbErr) -> StoreError { StoreError::Db(e.to_string()) }

fn json_param(v: Value) -> sea_orm::Value { v.into() }

/// Map a unique violation back to the catalog field whose index fired.
fn write_err(collection: Collection, e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            let field = INDEXES
                .iter()
                .filter(|ix| ix.unique && ix.collection == collection)
                .find(|ix| msg.contains(&ix.name()))
                .map_or(ID_FIELD, |ix| ix.field);
            StoreError::Duplicate { collection, field: field.to_string() }
        }
        _ => db_err(e),
    }
}

fn row_doc(row: &sea_orm::QueryResult) -> Result<Document, StoreError> {
    let v: Value = row.try_get("", "doc").map_err(db_err)?;
    match v {
        Value::Object(m) => Ok(m),
        other => Err(StoreError::Serialization(format!("stored document is not an object: {other}"))),
    }
}

/// `SELECT` for a find, with `$1` bound to the containment filter.
fn select_sql(collection: Collection, options: &FindOptions) -> (String, Vec<sea_orm::Value>) {
    let mut sql = format!("SELECT doc FROM {} WHERE doc @> $1", collection.name());
    let mut values = Vec::new();
    if let Some(sort) = &options.sort {
        let dir = if sort.descending { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY doc -> $2 {dir}"));
        values.push(sort.field.clone().into());
    }
    if let Some(limit) = options.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    (sql, values)
}

#[async_trait]
impl DocumentStore for SeaOrmStore {
    #[instrument(skip_all, fields(%collection))]
    async fn find(&self, collection: Collection, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>, StoreError> {
        let (sql, rest) = select_sql(collection, options);
        let mut values = vec![json_param(filter.to_object())];
        values.extend(rest);
        let rows = self.db.query_all(Self::stmt(sql, values)).await.map_err(db_err)?;
        let mut docs = Vec::with_capacity(rows.len());
        for row in &rows {
            let doc = row_doc(row)?;
            docs.push(match &options.projection {
                Some(p) => p.apply(doc),
                None => doc,
            });
        }
        Ok(docs)
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError> {
        let id = doc.get(ID_FIELD).and_then(Value::as_str).unwrap_or_default().to_string();
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.name());
        self.db
            .execute(Self::stmt(sql, vec![id.into(), json_param(Value::Object(doc))]))
            .await
            .map_err(|e| write_err(collection, e))?;
        Ok(())
    }

    async fn update_one(&self, collection: Collection, id: &str, mut set: Document) -> Result<Option<Document>, StoreError> {
        set.remove(ID_FIELD);
        let sql = format!("UPDATE {} SET doc = doc || $2 WHERE id = $1 RETURNING doc", collection.name());
        let row = self
            .db
            .query_one(Self::stmt(sql, vec![id.into(), json_param(Value::Object(set))]))
            .await
            .map_err(|e| write_err(collection, e))?;
        row.as_ref().map(row_doc).transpose()
    }

    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let res = self.db.execute(Self::stmt(sql, vec![id.into()])).await.map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) AS n FROM {} WHERE doc @> $1", collection.name());
        let row = self.db.query_one(Self::stmt(sql, vec![json_param(filter.to_object())])).await.map_err(db_err)?;
        let n: i64 = match row {
            Some(r) => r.try_get("", "n").map_err(db_err)?,
            None => 0,
        };
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.db.clone().close().await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_binds_sort_field_after_filter() {
        let (sql, values) = select_sql(Collection::Bookings, &FindOptions::new().sort_desc("createdAt").limit(5));
        assert_eq!(sql, "SELECT doc FROM bookings WHERE doc @> $1 ORDER BY doc -> $2 DESC LIMIT 5");
        assert_eq!(values.len(), 1);
        let (plain, none) = select_sql(Collection::Popups, &FindOptions::new());
        assert_eq!(plain, "SELECT doc FROM popups WHERE doc @> $1");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn postgres_round_trip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
            return Ok(());
        }
        let store = crate::test_support::pg_store().await?;
        let id = uuid::Uuid::new_v4().to_string();
        let username = format!("pg_{}", &id[..8]);
        let doc = match json!({"id": id, "username": username, "isActive": true}) {
            Value::Object(m) => m,
            _ => Document::new(),
        };
        store.insert_one(Collection::Admins, doc.clone()).await?;
        let mut dup = doc;
        dup.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
        let err = store.insert_one(Collection::Admins, dup).await;
        assert!(matches!(err, Err(StoreError::Duplicate { ref field, .. }) if field == "username"));

        let found = store.find_one(Collection::Admins, &Filter::new().eq("username", username.as_str())).await?;
        assert!(found.is_some());
        assert!(store.delete_one(Collection::Admins, &id).await?);
        Ok(())
    }
}
