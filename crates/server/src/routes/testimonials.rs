use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::testimonial::{Testimonial, TestimonialCreate, TestimonialUpdate};
use service::services::testimonials;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/testimonials", tag = "testimonials", responses((status = 200, description = "Approved testimonials", body = [Testimonial])))]
pub async fn list_approved(State(state): State<ServerState>) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(testimonials::list_approved(state.store.as_ref()).await?))
}

#[utoipa::path(post, path = "/api/testimonials", tag = "testimonials", request_body = TestimonialCreate, responses((status = 200, description = "Stored as pending", body = Testimonial), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<TestimonialCreate>) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(testimonials::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(get, path = "/api/admin/testimonials", tag = "testimonials", security(("bearer" = [])), responses((status = 200, body = [Testimonial])))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(testimonials::list_all(state.store.as_ref()).await?))
}

#[utoipa::path(put, path = "/api/admin/testimonials/{id}", tag = "testimonials", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = TestimonialUpdate, responses((status = 200, body = Testimonial), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<TestimonialUpdate>) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(testimonials::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/testimonials/{id}", tag = "testimonials", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    testimonials::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Testimonial deleted successfully")))
}
