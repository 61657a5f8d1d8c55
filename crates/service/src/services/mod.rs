//! Business operations per resource, one module each.
//!
//! Every operation validates its input, performs one store call (occasionally a
//! read before the write) and returns the resulting document.

use models::{changes, Resource, Validate};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::store::{repository::touch, DocumentStore, Repository};

pub mod bookings;
pub mod bootstrap;
pub mod cab_bookings;
pub mod contact;
pub mod gallery;
pub mod packages;
pub mod popups;
pub mod site_settings;
pub mod stats;
pub mod team;
pub mod testimonials;

/// Newest-first ordering shared by the admin listings.
pub(crate) const CREATED_AT: &str = "createdAt";

/// Validate an update shape and apply the fields it carries.
pub(crate) async fn apply_update<T, U>(store: &dyn DocumentStore, id: &str, update: &U) -> Result<T, ServiceError>
where
    T: Resource,
    U: Validate + Serialize,
{
    update.validate()?;
    let set = touch(changes(update)?);
    Repository::<T>::new(store).update(id, set).await
}

pub(crate) async fn insert_new<T, C>(store: &dyn DocumentStore, input: C, build: impl FnOnce(C) -> T) -> Result<T, ServiceError>
where
    T: Resource,
    C: Validate,
{
    input.validate()?;
    let doc = build(input);
    Repository::<T>::new(store).insert(&doc).await?;
    Ok(doc)
}
