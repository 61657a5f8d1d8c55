use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::package::{Package, PackageCreate, PackageUpdate};
use service::services::packages;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/packages", tag = "packages", responses((status = 200, description = "Active packages, newest first", body = [Package])))]
pub async fn list_public(State(state): State<ServerState>) -> Result<Json<Vec<Package>>, ApiError> {
    Ok(Json(packages::list_public(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/packages/{id}", tag = "packages", params(("id" = String, Path, description = "Document id")), responses((status = 200, body = Package), (status = 404, description = "Unknown or inactive package")))]
pub async fn get_public(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Package>, ApiError> {
    Ok(Json(packages::get_public(state.store.as_ref(), &id).await?))
}

#[utoipa::path(get, path = "/api/admin/packages", tag = "packages", security(("bearer" = [])), responses((status = 200, body = [Package])))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<Package>>, ApiError> {
    Ok(Json(packages::list_all(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/packages/{id}", tag = "packages", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = Package), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Package>, ApiError> {
    Ok(Json(packages::get(state.store.as_ref(), &id).await?))
}

#[utoipa::path(post, path = "/api/admin/packages", tag = "packages", security(("bearer" = [])), request_body = PackageCreate, responses((status = 200, body = Package), (status = 400, description = "Validation failed")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<PackageCreate>) -> Result<Json<Package>, ApiError> {
    Ok(Json(packages::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(put, path = "/api/admin/packages/{id}", tag = "packages", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = PackageUpdate, responses((status = 200, body = Package), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<PackageUpdate>) -> Result<Json<Package>, ApiError> {
    Ok(Json(packages::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/packages/{id}", tag = "packages", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    packages::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Package deleted successfully")))
}
