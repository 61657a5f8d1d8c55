use axum::{extract::State, Json};
use models::stats::DashboardStats;
use service::services::stats;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/admin/stats", tag = "stats", security(("bearer" = [])), responses((status = 200, body = DashboardStats)))]
pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(stats::dashboard(state.store.as_ref()).await?))
}
