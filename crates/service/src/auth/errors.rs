use models::account::Role;
use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid username or password")]
    Unauthorized,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token has expired")]
    Expired,
    #[error("token has been revoked")]
    Revoked,
    #[error("requires role {required}, token carries {actual}")]
    Forbidden { required: Role, actual: Role },
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Unauthorized => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken(_) => 1006,
            AuthError::Expired => 1007,
            AuthError::Revoked => 1008,
            AuthError::Forbidden { .. } => 1009,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the caller failed to prove who they are (as opposed to lacking a role or a server fault).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::Expired
                | AuthError::Revoked
        )
    }
}
