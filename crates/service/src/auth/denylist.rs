use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Revoked token ids, each held until the token would have expired anyway.
#[derive(Default)]
pub struct TokenDenylist {
    inner: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl TokenDenylist {
    pub fn new() -> Self { Self::default() }

    /// Add `jti`, dropping entries whose tokens have already expired.
    pub async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut map = self.inner.write().await;
        map.retain(|_, exp| *exp > now);
        if expires_at > now {
            map.insert(jti.to_string(), expires_at);
        }
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.inner.read().await.contains_key(jti)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn expired_entries_pruned_on_insert() {
        let list = TokenDenylist::new();
        let now = Utc::now();
        list.revoke("live", now + Duration::minutes(5)).await;
        list.revoke("already-expired", now - Duration::minutes(1)).await;
        assert!(list.is_revoked("live").await);
        assert!(!list.is_revoked("already-expired").await);
        assert_eq!(list.len().await, 1);
    }
}
