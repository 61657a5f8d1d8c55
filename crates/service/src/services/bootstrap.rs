//! Startup seeding: the default admin and, on request, the demo team.

use chrono::{TimeZone, Utc};
use models::account::{Admin, Role, TeamMember};
use models::timestamp;
use tracing::{info, warn};

use crate::auth::errors::AuthError;
use crate::auth::service::hash_password;
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, Repository};

/// Create the configured admin account unless it already exists. Returns whether one was created.
pub async fn ensure_default_admin(store: &dyn DocumentStore, cfg: &configs::AuthConfig) -> Result<bool, ServiceError> {
    let repo = Repository::<Admin>::new(store);
    if repo.find_one(&Filter::new().eq("username", cfg.admin_username.as_str())).await?.is_some() {
        return Ok(false);
    }
    let password = cfg.admin_password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))??;
    repo.insert(&Admin::new(cfg.admin_username.clone(), cfg.admin_email.clone(), hash)).await?;
    info!(username = %cfg.admin_username, "default admin created");
    if cfg.uses_default_admin_password() {
        warn!(username = %cfg.admin_username, "default admin uses the built-in password; set ADMIN_PASSWORD");
    }
    Ok(true)
}

struct DemoMember {
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    username: &'static str,
    password: &'static str,
    role: Role,
    department: &'static str,
    joined: (i32, u32, u32),
    packages_created: u32,
    clients_managed: u32,
    is_active: bool,
}

const DEMO_TEAM: [DemoMember; 3] = [
    DemoMember {
        full_name: "Rajesh Kumar",
        email: "rajesh.manager@gmbtravelskashmir.com",
        phone: "+91 87654 32109",
        username: "rajesh_manager",
        password: "manager123",
        role: Role::Manager,
        department: "Operations",
        joined: (2024, 2, 15),
        packages_created: 12,
        clients_managed: 38,
        is_active: true,
    },
    DemoMember {
        full_name: "Priya Sharma",
        email: "priya.agent@gmbtravelskashmir.com",
        phone: "+91 76543 21098",
        username: "priya_agent",
        password: "agent123",
        role: Role::Agent,
        department: "Sales",
        joined: (2024, 3, 10),
        packages_created: 8,
        clients_managed: 28,
        is_active: true,
    },
    DemoMember {
        full_name: "Amit Patel",
        email: "amit.agent@gmbtravelskashmir.com",
        phone: "+91 65432 10987",
        username: "amit_agent",
        password: "agent123",
        role: Role::Agent,
        department: "Customer Support",
        joined: (2024, 4, 5),
        packages_created: 5,
        clients_managed: 15,
        is_active: false,
    },
];

/// Insert the demo team when the collection is empty. Returns how many members were added.
pub async fn seed_demo_team(store: &dyn DocumentStore) -> Result<usize, ServiceError> {
    let repo = Repository::<TeamMember>::new(store);
    if repo.count(&Filter::new()).await? > 0 {
        return Ok(0);
    }
    let now = timestamp::now();
    for m in &DEMO_TEAM {
        let password = m.password;
        let hash = tokio::task::spawn_blocking(move || hash_password(password))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))??;
        let (y, mo, d) = m.joined;
        let member = TeamMember {
            id: models::new_id(),
            full_name: m.full_name.into(),
            email: m.email.into(),
            phone: m.phone.into(),
            username: m.username.into(),
            password_hash: hash,
            role: m.role,
            department: m.department.into(),
            joining_date: Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).single().unwrap_or(now),
            is_active: m.is_active,
            last_login: None,
            packages_created: m.packages_created,
            clients_managed: m.clients_managed,
            avatar: None,
            created_at: now,
            updated_at: now,
        };
        repo.insert(&member).await?;
    }
    warn!(count = DEMO_TEAM.len(), "demo team members seeded with well-known passwords");
    Ok(DEMO_TEAM.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;

    #[tokio::test]
    async fn admin_created_once() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let cfg = configs::AuthConfig::default();
        assert!(ensure_default_admin(store.as_ref(), &cfg).await?);
        assert!(!ensure_default_admin(store.as_ref(), &cfg).await?);
        let admin = Repository::<Admin>::new(store.as_ref())
            .find_one(&Filter::new().eq("username", "admin"))
            .await?
            .ok_or_else(|| anyhow::anyhow!("admin missing"))?;
        assert!(crate::auth::service::verify_password("admin123", &admin.password_hash));
        Ok(())
    }

    #[tokio::test]
    async fn demo_team_seeded_only_into_empty_collection() -> Result<(), anyhow::Error> {
        let store = memory_store();
        assert_eq!(seed_demo_team(store.as_ref()).await?, 3);
        assert_eq!(seed_demo_team(store.as_ref()).await?, 0);
        let inactive = Repository::<TeamMember>::new(store.as_ref())
            .count(&Filter::new().eq("isActive", false))
            .await?;
        assert_eq!(inactive, 1);
        Ok(())
    }
}
