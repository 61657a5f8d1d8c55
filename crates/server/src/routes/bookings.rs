use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::booking::{Booking, BookingCreate, BookingUpdate};
use service::services::bookings;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/bookings", tag = "bookings", request_body = BookingCreate, responses((status = 200, description = "Booking received as pending", body = Booking), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<BookingCreate>) -> Result<Json<Booking>, ApiError> {
    Ok(Json(bookings::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(get, path = "/api/admin/bookings", tag = "bookings", security(("bearer" = [])), responses((status = 200, body = [Booking])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(bookings::list(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = Booking), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Booking>, ApiError> {
    Ok(Json(bookings::get(state.store.as_ref(), &id).await?))
}

#[utoipa::path(put, path = "/api/admin/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = BookingUpdate, responses((status = 200, body = Booking), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<BookingUpdate>) -> Result<Json<Booking>, ApiError> {
    Ok(Json(bookings::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    bookings::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Booking deleted successfully")))
}
