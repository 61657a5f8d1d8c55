use models::contact::{ContactCreate, ContactInquiry, ContactUpdate};
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

#[instrument(skip_all, fields(subject = %input.subject))]
pub async fn create(store: &dyn DocumentStore, input: ContactCreate) -> Result<ContactInquiry, ServiceError> {
    let inquiry = insert_new(store, input, ContactCreate::into_inquiry).await?;
    info!(id = %inquiry.id, "inquiry_received");
    Ok(inquiry)
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<ContactInquiry>, ServiceError> {
    Repository::<ContactInquiry>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: ContactUpdate) -> Result<ContactInquiry, ServiceError> {
    apply_update(store, id, &input).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<ContactInquiry>::new(store).delete(id).await
}
