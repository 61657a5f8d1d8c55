use axum::{extract::State, Json};
use models::site_settings::{SiteSettings, SiteSettingsUpdate};
use serde::{Deserialize, Serialize};
use service::services::site_settings;
use utoipa::ToSchema;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub message: String,
    pub settings: SiteSettings,
}

#[utoipa::path(get, path = "/api/site-settings", tag = "site-settings", responses((status = 200, description = "Current settings, created from defaults on first read", body = SiteSettings)))]
pub async fn get_public(State(state): State<ServerState>) -> Result<Json<SiteSettings>, ApiError> {
    Ok(Json(site_settings::get_or_create(state.store.as_ref()).await?))
}

#[utoipa::path(get, path = "/api/admin/site-settings", tag = "site-settings", security(("bearer" = [])), responses((status = 200, body = SiteSettings)))]
pub async fn get(State(state): State<ServerState>) -> Result<Json<SiteSettings>, ApiError> {
    Ok(Json(site_settings::get_or_create(state.store.as_ref()).await?))
}

#[utoipa::path(put, path = "/api/admin/site-settings", tag = "site-settings", security(("bearer" = [])), request_body = SiteSettingsUpdate, responses((status = 200, body = SiteSettings), (status = 400, description = "Validation failed")))]
pub async fn update(State(state): State<ServerState>, AppJson(input): AppJson<SiteSettingsUpdate>) -> Result<Json<SiteSettings>, ApiError> {
    Ok(Json(site_settings::update(state.store.as_ref(), input).await?))
}

#[utoipa::path(post, path = "/api/admin/site-settings/reset", tag = "site-settings", security(("bearer" = [])), responses((status = 200, body = ResetResponse)))]
pub async fn reset(State(state): State<ServerState>) -> Result<Json<ResetResponse>, ApiError> {
    let settings = site_settings::reset(state.store.as_ref()).await?;
    Ok(Json(ResetResponse { message: "Settings reset to defaults".into(), settings }))
}
