use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use models::account::{TeamMemberCreate, TeamMemberUpdate, TeamMemberView};
use service::services::team;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/admin/team", tag = "team", security(("bearer" = [])), responses((status = 200, description = "Team members without password hashes", body = [TeamMemberView])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TeamMemberView>>, ApiError> {
    Ok(Json(team::list(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/team/{id}", tag = "team", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = TeamMemberView), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<TeamMemberView>, ApiError> {
    Ok(Json(team::get(state.store.as_ref(), &id).await?))
}

#[utoipa::path(post, path = "/api/admin/team", tag = "team", security(("bearer" = [])), request_body = TeamMemberCreate, responses((status = 200, body = TeamMemberView), (status = 400, description = "Validation failed or username/email taken")))]
pub async fn create(State(state): State<ServerState>, AppJson(input): AppJson<TeamMemberCreate>) -> Result<Json<TeamMemberView>, ApiError> {
    Ok(Json(team::create(state.store.as_ref(), input).await?))
}

#[utoipa::path(put, path = "/api/admin/team/{id}", tag = "team", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = TeamMemberUpdate, responses((status = 200, body = TeamMemberView), (status = 400, description = "Validation failed"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<TeamMemberUpdate>) -> Result<Json<TeamMemberView>, ApiError> {
    Ok(Json(team::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/team/{id}", tag = "team", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    team::delete(state.store.as_ref(), &id).await?;
    Ok(Json(Message::new("Team member deleted successfully")))
}
