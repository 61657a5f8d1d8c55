use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::contact::{ContactCreate, ContactInquiry, ContactUpdate};
use service::services::contact;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/contact", tag = "contact", request_body = ContactCreate, responses((status = 200, body = ContactInquiry), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<ContactCreate>) -> Result<Json<ContactInquiry>, ApiError> {
    Ok(Json(contact::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(get, path = "/api/admin/contact", tag = "contact", security(("bearer" = [])), responses((status = 200, body = [ContactInquiry])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ContactInquiry>>, ApiError> {
    Ok(Json(contact::list(state.store.as_ref()).await?))
}

#[utoipa::path(put, path = "/api/admin/contact/{id}", tag = "contact", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = ContactUpdate, responses((status = 200, body = ContactInquiry), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<ContactUpdate>) -> Result<Json<ContactInquiry>, ApiError> {
    Ok(Json(contact::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/contact/{id}", tag = "contact", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    contact::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Inquiry deleted successfully")))
}
