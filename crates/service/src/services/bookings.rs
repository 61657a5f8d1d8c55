use models::booking::{Booking, BookingCreate, BookingUpdate};
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

/// Public booking request; always starts pending.
#[instrument(skip_all, fields(package = %input.package_title))]
pub async fn create(store: &dyn DocumentStore, input: BookingCreate) -> Result<Booking, ServiceError> {
    let booking = insert_new(store, input, BookingCreate::into_booking).await?;
    info!(id = %booking.id, "booking_created");
    Ok(booking)
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Booking>, ServiceError> {
    Repository::<Booking>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<Booking, ServiceError> {
    Repository::<Booking>::new(store).get(id).await
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: BookingUpdate) -> Result<Booking, ServiceError> {
    apply_update(store, id, &input).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<Booking>::new(store).delete(id).await
}
