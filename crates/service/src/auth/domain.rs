use chrono::{DateTime, Utc};
use models::account::{AccountKind, Admin, Role, TeamMember};
use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Credential record resolved from either account collection.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub kind: AccountKind,
    pub role: Role,
    pub is_active: bool,
}

impl From<Admin> for Account {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            username: a.username,
            password_hash: a.password_hash,
            kind: AccountKind::Admin,
            role: Role::Admin,
            is_active: a.is_active,
        }
    }
}

impl From<TeamMember> for Account {
    fn from(m: TeamMember) -> Self {
        Self {
            id: m.id,
            username: m.username,
            password_hash: m.password_hash,
            kind: AccountKind::Team,
            role: m.role,
            is_active: m.is_active,
        }
    }
}

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    /// Account id.
    pub uid: String,
    pub kind: AccountKind,
    pub role: Role,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub username: String,
    pub account_id: String,
    pub kind: AccountKind,
    pub role: Role,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for Principal {
    fn from(c: Claims) -> Self {
        Self {
            username: c.sub,
            account_id: c.uid,
            kind: c.kind,
            role: c.role,
            token_id: c.jti,
            expires_at: DateTime::from_timestamp(c.exp, 0).unwrap_or_default(),
        }
    }
}

/// Login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until expiry.
    pub expires_in: i64,
}
