use std::sync::Arc;

use chrono::{DateTime, Utc};
use models::account::{AccountKind, Admin, TeamMember};
use models::timestamp;
use serde_json::Value;

use crate::auth::domain::Account;
use crate::auth::errors::AuthError;
use crate::auth::repository::AccountRepository;
use crate::store::{Document, DocumentStore, Filter, Repository};

/// Accounts read from the `admins` and `team_members` collections.
pub struct StoreAccountRepository {
    pub store: Arc<dyn DocumentStore>,
}

impl StoreAccountRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }
}

fn repo_err(e: impl std::fmt::Display) -> AuthError { AuthError::Repository(e.to_string()) }

#[async_trait::async_trait]
impl AccountRepository for StoreAccountRepository {
    async fn find_admin(&self, username: &str) -> Result<Option<Account>, AuthError> {
        let found = Repository::<Admin>::new(self.store.as_ref())
            .find_one(&Filter::new().eq("username", username))
            .await
            .map_err(repo_err)?;
        Ok(found.map(Account::from))
    }

    async fn find_team_member(&self, username: &str) -> Result<Option<Account>, AuthError> {
        let found = Repository::<TeamMember>::new(self.store.as_ref())
            .find_one(&Filter::new().eq("username", username))
            .await
            .map_err(repo_err)?;
        Ok(found.map(Account::from))
    }

    async fn record_login(&self, kind: AccountKind, id: &str, at: DateTime<Utc>) -> Result<(), AuthError> {
        let mut set = Document::new();
        set.insert("lastLogin".into(), Value::String(timestamp::format(&at)));
        let collection = match kind {
            AccountKind::Admin => models::Collection::Admins,
            AccountKind::Team => models::Collection::TeamMembers,
        };
        self.store.update_one(collection, id, set).await.map_err(repo_err)?;
        Ok(())
    }
}
