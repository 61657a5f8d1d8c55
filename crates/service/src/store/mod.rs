//! Persistence adapter.
//!
//! Collections hold schema-less JSON documents keyed by a string `id`. The
//! [`DocumentStore`] trait is the seam between the services and a backend:
//! - [`memory::MemoryStore`] keeps collections in process, optionally mirrored to a JSON file.
//! - [`seaorm::SeaOrmStore`] keeps one JSONB table per collection in Postgres.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use configs::{DatabaseConfig, StoreBackend};
use models::Collection;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod repository;
pub mod seaorm;

pub use memory::MemoryStore;
pub use repository::Repository;
pub use seaorm::SeaOrmStore;

pub type Document = Map<String, Value>;

/// Field every document is keyed by.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a {collection} document with this {field} already exists")]
    Duplicate { collection: Collection, field: String },
    #[error("database error: {0}")]
    Db(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Conjunction of top-level scalar equalities. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self { Self::default() }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    pub fn by_id(id: &str) -> Self { Self::new().eq(ID_FIELD, id) }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn matches(&self, doc: &Document) -> bool {
        self.terms.iter().all(|(field, value)| doc.get(field) == Some(value))
    }

    /// Object form used for JSONB containment.
    pub fn to_object(&self) -> Value {
        Value::Object(self.terms.iter().cloned().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Keep only these fields (plus `id`).
    Include(Vec<String>),
    /// Drop these fields.
    Exclude(Vec<String>),
}

impl Projection {
    pub fn apply(&self, mut doc: Document) -> Document {
        match self {
            Projection::Include(fields) => {
                doc.retain(|k, _| k == ID_FIELD || fields.iter().any(|f| f == k));
                doc
            }
            Projection::Exclude(fields) => {
                for f in fields {
                    doc.remove(f);
                }
                doc
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub sort: Option<Sort>,
    pub limit: Option<u64>,
    pub projection: Option<Projection>,
}

impl FindOptions {
    pub fn new() -> Self { Self::default() }

    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(Sort { field: field.into(), descending: false });
        self
    }

    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(Sort { field: field.into(), descending: true });
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn exclude(mut self, fields: &[&str]) -> Self {
        self.projection = Some(Projection::Exclude(fields.iter().map(|f| f.to_string()).collect()));
        self
    }

    pub fn include(mut self, fields: &[&str]) -> Self {
        self.projection = Some(Projection::Include(fields.iter().map(|f| f.to_string()).collect()));
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: Collection, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let mut docs = self.find(collection, filter, &FindOptions::new().limit(1)).await?;
        Ok(docs.pop())
    }

    /// Fails with [`StoreError::Duplicate`] when `id` or a unique field collides.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError>;

    /// Shallow-merge `set` into the document with this id; `None` when it does not exist.
    async fn update_one(&self, collection: Collection, id: &str, set: Document) -> Result<Option<Document>, StoreError>;

    /// Whether a document was removed.
    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool, StoreError>;

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    async fn close(&self) -> Result<(), StoreError>;
}

/// Open the backend `cfg.url` points at. Postgres stores are migrated before they are returned.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match cfg.backend()? {
        StoreBackend::Postgres => Arc::new(SeaOrmStore::connect(cfg).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File(path) => Arc::new(MemoryStore::open(path).await?),
    };
    Ok(store)
}

fn type_rank(v: &Value) -> u8 {
    // jsonb ordering: null < string < number < boolean < array < object
    match v {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Order two documents by one field. A missing field sorts last ascending and first descending,
/// the way Postgres orders SQL NULLs.
pub(crate) fn compare_docs(a: &Document, b: &Document, sort: &Sort) -> Ordering {
    let ord = match (a.get(&sort.field), b.get(&sort.field)) {
        (Some(x), Some(y)) => compare_values(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if sort.descending { ord.reverse() } else { ord }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(m) => m,
            _ => Document::new(),
        }
    }

    #[test]
    fn filter_matches_all_terms() {
        let d = doc(json!({"id": "1", "status": "active", "price": 10}));
        assert!(Filter::new().matches(&d));
        assert!(Filter::new().eq("status", "active").eq("price", 10).matches(&d));
        assert!(!Filter::new().eq("status", "inactive").matches(&d));
        assert!(!Filter::new().eq("missing", true).matches(&d));
        assert_eq!(Filter::by_id("1").to_object(), json!({"id": "1"}));
    }

    #[test]
    fn projection_include_keeps_id() {
        let d = doc(json!({"id": "1", "title": "t", "passwordHash": "x"}));
        let inc = Projection::Include(vec!["title".into()]).apply(d.clone());
        assert_eq!(Value::Object(inc), json!({"id": "1", "title": "t"}));
        let exc = Projection::Exclude(vec!["passwordHash".into()]).apply(d);
        assert!(!exc.contains_key("passwordHash"));
    }

    #[test]
    fn missing_fields_sort_like_nulls() {
        let with = doc(json!({"rating": 3}));
        let without = doc(json!({}));
        let asc = Sort { field: "rating".into(), descending: false };
        let desc = Sort { field: "rating".into(), descending: true };
        assert_eq!(compare_docs(&with, &without, &asc), Ordering::Less);
        assert_eq!(compare_docs(&with, &without, &desc), Ordering::Greater);
        let higher = doc(json!({"rating": 5}));
        assert_eq!(compare_docs(&higher, &with, &desc), Ordering::Less);
    }
}
