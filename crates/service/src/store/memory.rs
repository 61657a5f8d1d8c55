use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use models::Collection;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use super::{compare_docs, Document, DocumentStore, Filter, FindOptions, StoreError, ID_FIELD};

type Collections = BTreeMap<Collection, Vec<Document>>;

/// In-process document store.
///
/// Enforces the catalog's unique indexes. When opened on a path, the whole
/// state is rewritten to that JSON file after every write.
pub struct MemoryStore {
    inner: RwLock<Collections>,
    file_path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self { Self::new() }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Collections::new()), file_path: None }
    }

    /// Load from `path`, creating the file with empty state if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let state: Collections = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Collections::new();
                write_state(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        let total: usize = state.values().map(Vec::len).sum();
        info!(path = %file_path.display(), documents = total, "file store loaded");

        Ok(Self { inner: RwLock::new(state), file_path: Some(file_path) })
    }

    async fn save(&self, state: &Collections) -> Result<(), StoreError> {
        match &self.file_path {
            Some(path) => write_state(path, state).await,
            None => Ok(()),
        }
    }

    /// Swap in the new contents of `collection` and persist. A failed save restores the previous contents.
    async fn commit(&self, state: &mut Collections, collection: Collection, docs: Vec<Document>) -> Result<(), StoreError> {
        let previous = state.insert(collection, docs);
        if let Err(e) = self.save(state).await {
            match previous {
                Some(prev) => state.insert(collection, prev),
                None => state.remove(&collection),
            };
            return Err(e);
        }
        Ok(())
    }
}

async fn write_state(path: &PathBuf, state: &Collections) -> Result<(), StoreError> {
    let data = serde_json::to_vec(state).map_err(|e| StoreError::Serialization(e.to_string()))?;
    fs::write(path, data).await.map_err(|e| StoreError::Io(e.to_string()))
}

fn doc_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// First unique field (including `id`) on which `candidate` collides with another document.
fn unique_conflict(collection: Collection, docs: &[Document], candidate: &Document, skip_id: Option<&str>) -> Option<String> {
    let unique_fields = std::iter::once(ID_FIELD).chain(collection.indexes().filter(|ix| ix.unique).map(|ix| ix.field));
    for field in unique_fields {
        let Some(value) = candidate.get(field).filter(|v| !v.is_null()) else { continue };
        let clash = docs
            .iter()
            .filter(|d| skip_id.map_or(true, |id| doc_id(d) != Some(id)))
            .any(|d| d.get(field) == Some(value));
        if clash {
            return Some(field.to_string());
        }
    }
    None
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>, StoreError> {
        let state = self.inner.read().await;
        let mut docs: Vec<Document> = state
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        drop(state);

        if let Some(sort) = &options.sort {
            docs.sort_by(|a, b| compare_docs(a, b, sort));
        }
        if let Some(limit) = options.limit {
            docs.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        if let Some(projection) = &options.projection {
            docs = docs.into_iter().map(|d| projection.apply(d)).collect();
        }
        Ok(docs)
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let mut docs = state.get(&collection).cloned().unwrap_or_default();
        if let Some(field) = unique_conflict(collection, &docs, &doc, None) {
            return Err(StoreError::Duplicate { collection, field });
        }
        docs.push(doc);
        self.commit(&mut state, collection, docs).await?;
        debug!(%collection, "document inserted");
        Ok(())
    }

    async fn update_one(&self, collection: Collection, id: &str, set: Document) -> Result<Option<Document>, StoreError> {
        let mut state = self.inner.write().await;
        let mut docs = state.get(&collection).cloned().unwrap_or_default();
        let Some(pos) = docs.iter().position(|d| doc_id(d) == Some(id)) else {
            return Ok(None);
        };

        let mut merged = docs[pos].clone();
        for (k, v) in set {
            // id is immutable
            if k != ID_FIELD {
                merged.insert(k, v);
            }
        }
        if let Some(field) = unique_conflict(collection, &docs, &merged, Some(id)) {
            return Err(StoreError::Duplicate { collection, field });
        }
        docs[pos] = merged.clone();
        self.commit(&mut state, collection, docs).await?;
        Ok(Some(merged))
    }

    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let mut state = self.inner.write().await;
        let Some(current) = state.get(&collection) else { return Ok(false) };
        let docs: Vec<Document> = current.iter().filter(|d| doc_id(d) != Some(id)).cloned().collect();
        if docs.len() == current.len() {
            return Ok(false);
        }
        self.commit(&mut state, collection, docs).await?;
        Ok(true)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let state = self.inner.read().await;
        let n = state.get(&collection).map_or(0, |docs| docs.iter().filter(|d| filter.matches(d)).count());
        Ok(n as u64)
    }

    async fn close(&self) -> Result<(), StoreError> {
        let state = self.inner.read().await;
        self.save(&state).await
    }
}
