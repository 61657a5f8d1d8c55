use models::account::{TeamMember, TeamMemberCreate, TeamMemberUpdate, TeamMemberView, PASSWORD_HASH_FIELD};
use models::{changes, Validate};
use serde_json::Value;
use tracing::{info, instrument};

use super::CREATED_AT;
use crate::auth::errors::AuthError;
use crate::auth::service::hash_password;
use crate::errors::ServiceError;
use crate::store::{repository::touch, DocumentStore, Filter, FindOptions, Repository};

async fn hash_blocking(password: String) -> Result<String, ServiceError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))??;
    Ok(hashed)
}

fn without_hash() -> FindOptions {
    FindOptions::new().exclude(&[PASSWORD_HASH_FIELD])
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<TeamMemberView>, ServiceError> {
    Repository::<TeamMemberView>::new(store)
        .list(&Filter::new(), &without_hash().sort_desc(CREATED_AT))
        .await
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<TeamMemberView, ServiceError> {
    Repository::<TeamMember>::new(store).get(id).await.map(TeamMemberView::from)
}

#[instrument(skip_all, fields(username = %input.username, role = %input.role))]
pub async fn create(store: &dyn DocumentStore, input: TeamMemberCreate) -> Result<TeamMemberView, ServiceError> {
    input.validate()?;
    let hash = hash_blocking(input.password.clone()).await?;
    let member = input.into_member(hash);
    Repository::<TeamMember>::new(store).insert(&member).await?;
    info!(id = %member.id, "team_member_created");
    Ok(member.into())
}

/// Any field may change; a non-empty password is re-hashed.
#[instrument(skip_all, fields(%id))]
pub async fn update(store: &dyn DocumentStore, id: &str, input: TeamMemberUpdate) -> Result<TeamMemberView, ServiceError> {
    let input = input.normalized();
    input.validate()?;
    let mut set = changes(&input)?;
    if let Some(password) = input.new_password() {
        let hash = hash_blocking(password.to_string()).await?;
        set.insert(PASSWORD_HASH_FIELD.into(), Value::String(hash));
        info!("password_changed");
    }
    Repository::<TeamMember>::new(store).update(id, touch(set)).await.map(TeamMemberView::from)
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<TeamMember>::new(store).delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::verify_password;
    use crate::test_support::memory_store;
    use models::account::Role;
    use serde_json::json;

    fn input(username: &str, email: &str) -> Result<TeamMemberCreate, serde_json::Error> {
        serde_json::from_value(json!({
            "fullName": "Priya Sharma",
            "email": email,
            "phone": "+91 76543 21098",
            "username": username,
            "password": "agent12345",
            "department": "Sales"
        }))
    }

    #[tokio::test]
    async fn password_hashed_and_never_listed() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let created = create(store.as_ref(), input("priya_agent", "priya@example.com")?).await?;
        assert_eq!(created.role, Role::Agent);

        let stored = Repository::<TeamMember>::new(store.as_ref()).get(&created.id).await?;
        assert!(verify_password("agent12345", &stored.password_hash));

        let raw = store.find(models::Collection::TeamMembers, &Filter::new(), &without_hash()).await?;
        assert!(raw.iter().all(|d| !d.contains_key(PASSWORD_HASH_FIELD)));
        assert_eq!(list(store.as_ref()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_is_a_validation_error() -> Result<(), anyhow::Error> {
        let store = memory_store();
        create(store.as_ref(), input("priya_agent", "priya@example.com")?).await?;
        let dup = create(store.as_ref(), input("priya_agent", "other@example.com")?).await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_rehashes_password_and_changes_role() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let created = create(store.as_ref(), input("amit_agent", "amit@example.com")?).await?;
        let upd = TeamMemberUpdate { password: Some("brand-new-pass".into()), role: Some(Role::Manager), ..Default::default() };
        let view = update(store.as_ref(), &created.id, upd).await?;
        assert_eq!(view.role, Role::Manager);

        let stored = Repository::<TeamMember>::new(store.as_ref()).get(&created.id).await?;
        assert!(verify_password("brand-new-pass", &stored.password_hash));
        assert!(!verify_password("agent12345", &stored.password_hash));
        Ok(())
    }

    #[tokio::test]
    async fn padded_email_cannot_dodge_unique_index() -> Result<(), anyhow::Error> {
        let store = memory_store();
        create(store.as_ref(), input("priya_agent", "p@x.com")?).await?;
        let amit = create(store.as_ref(), input("amit_agent", "a@x.com")?).await?;

        let upd = TeamMemberUpdate { email: Some(" p@x.com ".into()), ..Default::default() };
        let dup = update(store.as_ref(), &amit.id, upd).await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));

        let upd = TeamMemberUpdate { email: Some("  amit@x.com ".into()), ..Default::default() };
        assert_eq!(update(store.as_ref(), &amit.id, upd).await?.email, "amit@x.com");
        Ok(())
    }
}
