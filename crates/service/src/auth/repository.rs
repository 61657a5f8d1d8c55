use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::account::AccountKind;

use super::domain::Account;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_admin(&self, username: &str) -> Result<Option<Account>, AuthError>;
    async fn find_team_member(&self, username: &str) -> Result<Option<Account>, AuthError>;
    async fn record_login(&self, kind: AccountKind, id: &str, at: DateTime<Utc>) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        admins: Mutex<HashMap<String, Account>>,  // key: username
        team: Mutex<HashMap<String, Account>>,    // key: username
        logins: Mutex<Vec<(AccountKind, String)>>,
    }

    impl MockAccountRepository {
        pub async fn add(&self, account: Account) {
            let map = match account.kind {
                AccountKind::Admin => &self.admins,
                AccountKind::Team => &self.team,
            };
            map.lock().await.insert(account.username.clone(), account);
        }

        pub async fn logins(&self) -> Vec<(AccountKind, String)> {
            self.logins.lock().await.clone()
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_admin(&self, username: &str) -> Result<Option<Account>, AuthError> {
            Ok(self.admins.lock().await.get(username).cloned())
        }

        async fn find_team_member(&self, username: &str) -> Result<Option<Account>, AuthError> {
            Ok(self.team.lock().await.get(username).cloned())
        }

        async fn record_login(&self, kind: AccountKind, id: &str, _at: DateTime<Utc>) -> Result<(), AuthError> {
            self.logins.lock().await.push((kind, id.to_string()));
            Ok(())
        }
    }
}
