use std::marker::PhantomData;

use models::{timestamp, Resource};
use serde::Serialize;
use serde_json::Value;

use super::{Document, DocumentStore, Filter, FindOptions};
use crate::errors::ServiceError;

/// Typed view of one collection.
pub struct Repository<'a, T> {
    store: &'a dyn DocumentStore,
    _doc: PhantomData<fn() -> T>,
}

pub fn to_document<S: Serialize>(value: &S) -> Result<Document, ServiceError> {
    Ok(models::changes(value)?)
}

fn from_document<T: Resource>(doc: Document) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| ServiceError::Internal(format!("corrupt {} document: {e}", T::COLLECTION)))
}

/// Stamp `updatedAt` on a `$set` map.
pub fn touch(mut set: Document) -> Document {
    set.insert("updatedAt".into(), Value::String(timestamp::format(&timestamp::now())));
    set
}

impl<'a, T: Resource> Repository<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store, _doc: PhantomData }
    }

    pub async fn list(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<T>, ServiceError> {
        let docs = self.store.find(T::COLLECTION, filter, options).await?;
        docs.into_iter().map(from_document).collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>, ServiceError> {
        self.store.find_one(T::COLLECTION, filter).await?.map(from_document).transpose()
    }

    pub async fn get(&self, id: &str) -> Result<T, ServiceError> {
        self.find_one(&Filter::by_id(id)).await?.ok_or_else(|| ServiceError::not_found(T::LABEL))
    }

    pub async fn insert(&self, value: &T) -> Result<(), ServiceError> {
        self.store.insert_one(T::COLLECTION, to_document(value)?).await?;
        Ok(())
    }

    pub async fn update(&self, id: &str, set: Document) -> Result<T, ServiceError> {
        let doc = self
            .store
            .update_one(T::COLLECTION, id, set)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.store.delete_one(T::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(T::LABEL))
        }
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, ServiceError> {
        Ok(self.store.count(T::COLLECTION, filter).await?)
    }
}
