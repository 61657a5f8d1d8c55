use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::cab_booking::{CabBooking, CabBookingCreate, CabBookingUpdate};
use service::services::cab_bookings;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/cab-bookings", tag = "cab-bookings", request_body = CabBookingCreate, responses((status = 200, body = CabBooking), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<CabBookingCreate>) -> Result<Json<CabBooking>, ApiError> {
    Ok(Json(cab_bookings::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(get, path = "/api/admin/cab-bookings", tag = "cab-bookings", security(("bearer" = [])), responses((status = 200, body = [CabBooking])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CabBooking>>, ApiError> {
    Ok(Json(cab_bookings::list(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/cab-bookings/{id}", tag = "cab-bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = CabBooking), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<CabBooking>, ApiError> {
    Ok(Json(cab_bookings::get(state.store.as_ref(), &id).await?))
}

#[utoipa::path(put, path = "/api/admin/cab-bookings/{id}", tag = "cab-bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = CabBookingUpdate, responses((status = 200, body = CabBooking), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<CabBookingUpdate>) -> Result<Json<CabBooking>, ApiError> {
    Ok(Json(cab_bookings::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/cab-bookings/{id}", tag = "cab-bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    cab_bookings::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Cab booking deleted successfully")))
}
