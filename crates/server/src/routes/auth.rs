use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Json,
};
use common::types::Message;
use models::account::{AccountKind, Role};
use serde::{Deserialize, Serialize};
use service::auth::{
    domain::{LoginInput, Principal, TokenGrant},
    errors::AuthError,
    service::authorize,
};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::errors::{ApiError, AppJson};
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenGrant> for TokenResponse {
    fn from(g: TokenGrant) -> Self {
        Self { access_token: g.access_token, token_type: g.token_type, expires_in: g.expires_in }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    /// Username the token was issued to.
    pub admin: String,
    pub role: Role,
    pub kind: AccountKind,
}

/// Bearer token from the `Authorization` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Identity placed on the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}

/// Verify the bearer token and attach the principal for downstream handlers.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).map(str::to_owned).ok_or(AuthError::MissingToken)?;
    let principal = state.auth.verify_token(&token).await.map_err(|e| {
        debug!(error = %e, path = %req.uri().path(), "token_rejected");
        e
    })?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Role gate. Must sit inside [`require_auth`].
pub async fn require_role(State(required): State<Role>, req: Request, next: Next) -> Result<Response, ApiError> {
    let principal = req.extensions().get::<Principal>().ok_or(AuthError::MissingToken)?;
    if let Err(e) = authorize(principal, required) {
        warn!(username = %principal.username, %required, actual = %principal.role, path = %req.uri().path(), "role_denied");
        return Err(e.into());
    }
    Ok(next.run(req).await)
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = LoginRequest, responses((status = 200, body = TokenResponse), (status = 400, description = "Missing credentials"), (status = 401, description = "Invalid username or password")))]
pub async fn login(State(state): State<ServerState>, AppJson(input): AppJson<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
    let grant = state.auth.login(LoginInput { username: input.username, password: input.password }).await?;
    Ok(Json(grant.into()))
}

#[utoipa::path(get, path = "/api/auth/verify", tag = "auth", security(("bearer" = [])), responses((status = 200, body = VerifyResponse), (status = 401, description = "Missing, invalid, expired or revoked token")))]
pub async fn verify(CurrentUser(principal): CurrentUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true, admin: principal.username, role: principal.role, kind: principal.kind })
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", security(("bearer" = [])), responses((status = 200, body = crate::openapi::MessageResponse), (status = 401, description = "Missing or invalid token")))]
pub async fn logout(State(state): State<ServerState>, CurrentUser(principal): CurrentUser) -> Json<Message> {
    state.auth.revoke(&principal).await;
    Json(Message::new("Logged out"))
}
