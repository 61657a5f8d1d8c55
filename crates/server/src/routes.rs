use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use common::types::{Health, Message};
use models::account::Role;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod bookings;
pub mod cab_bookings;
pub mod contact;
pub mod gallery;
pub mod packages;
pub mod popups;
pub mod site_settings;
pub mod stats;
pub mod team;
pub mod testimonials;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/api/", tag = "health", responses((status = 200, body = crate::openapi::MessageResponse)))]
pub async fn api_root() -> Json<Message> {
    Json(Message::new("G.M.B Travels Kashmir API"))
}

/// Build the full application router: public API, role-gated admin API, uploads and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let uploads = ServeDir::new(&state.uploads.dir);
    let upload_prefix = state.uploads.url_prefix.clone();
    let upload_limit = state.uploads.max_bytes;

    let public = Router::new()
        .route("/health", get(health))
        .route("/api", get(api_root))
        .route("/api/", get(api_root))
        .route("/api/auth/login", post(auth::login))
        .route("/api/packages", get(packages::list_public))
        .route("/api/packages/:id", get(packages::get_public))
        .route("/api/bookings", post(bookings::create))
        .route("/api/cab-bookings", post(cab_bookings::create))
        .route("/api/contact", post(contact::create))
        .route("/api/testimonials", get(testimonials::list_approved).post(testimonials::create))
        .route("/api/gallery", get(gallery::list_active))
        .route("/api/popups", get(popups::list_live))
        .route("/api/site-settings", get(site_settings::get_public));

    // any valid token
    let session = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/auth/logout", post(auth::logout));

    let agent = Router::new()
        .route("/api/admin/bookings", get(bookings::list))
        .route("/api/admin/bookings/:id", get(bookings::get).put(bookings::update).delete(bookings::delete))
        .route("/api/admin/cab-bookings", get(cab_bookings::list))
        .route(
            "/api/admin/cab-bookings/:id",
            get(cab_bookings::get).put(cab_bookings::update).delete(cab_bookings::delete),
        )
        .route("/api/admin/contact", get(contact::list))
        .route("/api/admin/contact/:id", put(contact::update).delete(contact::delete))
        .route("/api/admin/stats", get(stats::dashboard))
        .route_layer(middleware::from_fn_with_state(Role::Agent, auth::require_role));

    let manager = Router::new()
        .route("/api/admin/packages", get(packages::list_all).post(packages::create))
        .route("/api/admin/packages/:id", get(packages::get).put(packages::update).delete(packages::delete))
        .route("/api/admin/testimonials", get(testimonials::list_all))
        .route(
            "/api/admin/testimonials/:id",
            put(testimonials::update).delete(testimonials::delete),
        )
        .route("/api/admin/upload", post(gallery::upload).layer(DefaultBodyLimit::max(upload_limit)))
        .route("/api/admin/gallery", get(gallery::list_all))
        .route("/api/admin/gallery/:id", put(gallery::update).delete(gallery::delete))
        .route("/api/admin/popups", get(popups::list_all).post(popups::create))
        .route("/api/admin/popups/:id", get(popups::get).put(popups::update).delete(popups::delete))
        .route("/api/admin/popups/:id/toggle", post(popups::toggle))
        .route_layer(middleware::from_fn_with_state(Role::Manager, auth::require_role));

    let admin = Router::new()
        .route("/api/admin/team", get(team::list).post(team::create))
        .route("/api/admin/team/:id", get(team::get).put(team::update).delete(team::delete))
        .route("/api/admin/site-settings", get(site_settings::get).put(site_settings::update))
        .route("/api/admin/site-settings/reset", post(site_settings::reset))
        .route_layer(middleware::from_fn_with_state(Role::Admin, auth::require_role));

    // require_auth is added last so it runs before every role gate
    let protected = session
        .merge(agent)
        .merge(manager)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    public
        .merge(protected)
        .nest_service(&upload_prefix, uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and handler failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
