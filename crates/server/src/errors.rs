use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        FromRequest,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use models::ModelError;
use serde::Serialize;
use serde_json::json;
use service::{auth::errors::AuthError, ServiceError};
use thiserror::Error;
use tracing::{debug, error};

/// Error surfaced to HTTP clients as `{"error": ..., "detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Logged in full, answered with a generic body.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Bad Request",
            ApiError::Unauthenticated(_) => "Unauthorized",
            ApiError::Forbidden(_) => "Forbidden",
            ApiError::NotFound(_) => "Not Found",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(cause) => {
                error!(%cause, "request_failed");
                "internal server error".to_string()
            }
            other => {
                debug!(%status, detail = %other, "request_rejected");
                other.to_string()
            }
        };
        (status, Json(json!({ "error": self.title(), "detail": detail }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::Model(ModelError::Validation(msg)) => ApiError::Validation(msg),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Auth(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if e.is_unauthenticated() {
            return ApiError::Unauthenticated(e.to_string());
        }
        match e {
            AuthError::Validation(msg) => ApiError::Validation(msg),
            forbidden @ AuthError::Forbidden { .. } => ApiError::Forbidden(forbidden.to_string()),
            other => ApiError::Internal(format!("auth error {}: {}", other.code(), other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Validation(e.body_text())
    }
}

/// `Json` whose rejections come back in the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::account::Role;

    #[test]
    fn maps_service_errors_to_status() {
        let cases = [
            (ServiceError::Validation("dup".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::invalid("rating")), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Package"), StatusCode::NOT_FOUND),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Auth(AuthError::Expired), StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn forbidden_is_not_unauthenticated() {
        let err = ApiError::from(AuthError::Forbidden { required: Role::Admin, actual: Role::Agent });
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        let err = ApiError::from(AuthError::MissingToken);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_detail_is_generic() {
        let resp = ApiError::Internal("connection refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
