use axum::{
    extract::{Path, Query, State},
    Json,
};
use common::types::Message;
use models::popup::{Popup, PopupCreate, PopupUpdate};
use serde::Deserialize;
use service::services::popups;
use utoipa::IntoParams;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PopupQuery {
    /// Page identifier the popup should target.
    pub page: Option<String>,
}

#[utoipa::path(get, path = "/api/popups", tag = "popups", params(PopupQuery), responses((status = 200, description = "Active popups inside their date window", body = [Popup])))]
pub async fn list_live(State(state): State<ServerState>, Query(q): Query<PopupQuery>) -> Result<Json<Vec<Popup>>, ApiError> {
    Ok(Json(popups::list_live(state.store.as_ref(), q.page.as_deref()).await?))
}

#[utoipa::path(get, path = "/api/admin/popups", tag = "popups", security(("bearer" = [])), responses((status = 200, body = [Popup])))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<Popup>>, ApiError> {
    Ok(Json(popups::list_all(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/popups/{id}", tag = "popups", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = Popup), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Popup>, ApiError> {
    Ok(Json(popups::get(state.store.as_ref(), &id).await?))
}

#[utoipa::path(post, path = "/api/admin/popups", tag = "popups", security(("bearer" = [])), request_body = PopupCreate, responses((status = 200, body = Popup), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<PopupCreate>) -> Result<Json<Popup>, ApiError> {
    Ok(Json(popups::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(put, path = "/api/admin/popups/{id}", tag = "popups", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = PopupUpdate, responses((status = 200, body = Popup), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<PopupUpdate>) -> Result<Json<Popup>, ApiError> {
    Ok(Json(popups::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(post, path = "/api/admin/popups/{id}/toggle", tag = "popups", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, description = "Popup with isActive flipped", body = Popup), (status = 404, description = "Not found")))]
pub async fn toggle(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Popup>, ApiError> {
    Ok(Json(popups::toggle(state.store.as_ref(), &id).await?))
}

#[utoipa::path(delete, path = "/api/admin/popups/{id}", tag = "popups", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    popups::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Popup deleted successfully")))
}
