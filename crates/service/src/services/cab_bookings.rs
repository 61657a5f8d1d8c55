use models::cab_booking::{CabBooking, CabBookingCreate, CabBookingUpdate};
use models::Validate;
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

#[instrument(skip_all, fields(trip = ?input.trip_type))]
pub async fn create(store: &dyn DocumentStore, input: CabBookingCreate) -> Result<CabBooking, ServiceError> {
    let cab = insert_new(store, input, CabBookingCreate::into_cab_booking).await?;
    info!(id = %cab.id, "cab_booking_created");
    Ok(cab)
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<CabBooking>, ServiceError> {
    Repository::<CabBooking>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<CabBooking, ServiceError> {
    Repository::<CabBooking>::new(store).get(id).await
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: CabBookingUpdate) -> Result<CabBooking, ServiceError> {
    input.validate()?;
    if input.pickup_date.is_some() || input.return_date.is_some() {
        let current = get(store, id).await?;
        input.check_against(&current)?;
    }
    apply_update(store, id, &input).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<CabBooking>::new(store).delete(id).await
}
