use std::sync::{Arc, OnceLock};

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::account::Role;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::denylist::TokenDenylist;
use super::domain::{Account, Claims, LoginInput, Principal, TokenGrant};
use super::errors::AuthError;
use super::repository::AccountRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn from_settings(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), token_ttl: Duration::minutes(cfg.token_ttl_minutes) }
    }
}

/// Argon2id PHC string for `plain` with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// Constant-time check through the hash's own verifier. Malformed hashes never verify.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

/// Hash of a throwaway secret, checked when the username is unknown so every login pays one Argon2 verify.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password(&uuid::Uuid::new_v4().to_string()).unwrap_or_default())
}

/// Role gate: `principal` must hold at least `required`.
pub fn authorize(principal: &Principal, required: Role) -> Result<(), AuthError> {
    if principal.role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden { required, actual: principal.role })
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AccountRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
    denylist: TokenDenylist,
}

impl<R: AccountRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg, denylist: TokenDenylist::new() }
    }

    /// Sign a token for `account`.
    pub fn issue_token(&self, account: &Account) -> Result<TokenGrant, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.username.clone(),
            uid: account.id.clone(),
            kind: account.kind,
            role: account.role,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(TokenGrant {
            access_token: token,
            token_type: "bearer".into(),
            expires_in: self.cfg.token_ttl.num_seconds(),
        })
    }

    /// Check signature, expiry and revocation.
    pub async fn verify_token(&self, token: &str) -> Result<Principal, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;
        if self.denylist.is_revoked(&data.claims.jti).await {
            return Err(AuthError::Revoked);
        }
        Ok(Principal::from(data.claims))
    }

    /// Authenticate against admins first, then team members, and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig, hash_password}, repository::mock::MockAccountRepository};
    /// use service::auth::domain::{Account, LoginInput};
    /// use models::account::{AccountKind, Role};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let hash = hash_password("Passw0rd!").unwrap();
    /// tokio_test::block_on(repo.add(Account { id: "1".into(), username: "admin".into(), password_hash: hash, kind: AccountKind::Admin, role: Role::Admin, is_active: true }));
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::minutes(60) });
    /// let grant = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd!".into() })).unwrap();
    /// assert_eq!(grant.token_type, "bearer");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenGrant, AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("username and password are required".into()));
        }
        let account = match self.repo.find_admin(&input.username).await? {
            Some(admin) => Some(admin),
            None => self.repo.find_team_member(&input.username).await?,
        };
        let hash = account.as_ref().map(|a| a.password_hash.clone());
        let password = input.password;
        let ok = tokio::task::spawn_blocking(move || verify_password(&password, hash.as_deref().unwrap_or_else(|| dummy_hash())))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))?;

        let Some(account) = account else {
            debug!("unknown username");
            return Err(AuthError::Unauthorized);
        };
        if !account.is_active {
            debug!(kind = ?account.kind, "account inactive");
            return Err(AuthError::Unauthorized);
        }
        if !ok {
            return Err(AuthError::Unauthorized);
        }

        self.repo.record_login(account.kind, &account.id, models::timestamp::now()).await?;
        let grant = self.issue_token(&account)?;
        info!(account_id = %account.id, kind = ?account.kind, role = %account.role, "login_succeeded");
        Ok(grant)
    }

    /// Deny the principal's token for the rest of its lifetime.
    pub async fn revoke(&self, principal: &Principal) {
        self.denylist.revoke(&principal.token_id, principal.expires_at).await;
        info!(username = %principal.username, "token_revoked");
    }
}
