//! Accounts that can sign in: site admins and team members.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Staff role. Declaration order is privilege order: `Agent < Manager < Admin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Agent,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which collection an authenticated principal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Admin,
    Team,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: crate::new_id(),
            username: username.into(),
            password_hash,
            email: email.into(),
            is_active: true,
            last_login: None,
            created_at: timestamp::now(),
        }
    }
}

impl Resource for Admin {
    const COLLECTION: Collection = Collection::Admins;
    const LABEL: &'static str = "Admin";

    fn id(&self) -> &str { &self.id }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    #[serde(with = "timestamp")]
    pub joining_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub packages_created: u32,
    #[serde(default)]
    pub clients_managed: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for TeamMember {
    const COLLECTION: Collection = Collection::TeamMembers;
    const LABEL: &'static str = "Team member";

    fn id(&self) -> &str { &self.id }
}

/// Field projected away whenever team members leave the service layer.
pub const PASSWORD_HASH_FIELD: &str = "passwordHash";

/// Team member as returned by the API; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub role: Role,
    pub department: String,
    #[serde(with = "timestamp")]
    pub joining_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub packages_created: u32,
    #[serde(default)]
    pub clients_managed: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for TeamMemberView {
    const COLLECTION: Collection = Collection::TeamMembers;
    const LABEL: &'static str = "Team member";

    fn id(&self) -> &str { &self.id }
}

impl From<TeamMember> for TeamMemberView {
    fn from(m: TeamMember) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            phone: m.phone,
            username: m.username,
            role: m.role,
            department: m.department,
            joining_date: m.joining_date,
            is_active: m.is_active,
            last_login: m.last_login,
            packages_created: m.packages_created,
            clients_managed: m.clients_managed,
            avatar: m.avatar,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberCreate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    /// Plaintext; hashed before storage.
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub department: String,
    #[serde(default, with = "timestamp::option")]
    pub joining_date: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

fn check_password(password: &str) -> Result<(), ModelError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ModelError::invalid(format!("password must be at least {MIN_PASSWORD_LEN} characters")));
    }
    Ok(())
}

fn check_username(username: &str) -> Result<(), ModelError> {
    validate::required("username", username)?;
    if username.chars().any(char::is_whitespace) {
        return Err(ModelError::invalid("username must not contain whitespace"));
    }
    Ok(())
}

impl Validate for TeamMemberCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("fullName", &self.full_name)?;
        validate::email(&self.email)?;
        validate::required("phone", &self.phone)?;
        check_username(&self.username)?;
        check_password(&self.password)?;
        validate::required("department", &self.department)
    }
}

impl TeamMemberCreate {
    /// Build the stored record; `password_hash` comes from the auth service.
    pub fn into_member(self, password_hash: String) -> TeamMember {
        let now = timestamp::now();
        TeamMember {
            id: crate::new_id(),
            full_name: self.full_name,
            email: validate::normalize_email(&self.email),
            phone: self.phone,
            username: self.username,
            password_hash,
            role: self.role,
            department: self.department,
            joining_date: self.joining_date.unwrap_or(now),
            is_active: self.is_active,
            last_login: None,
            packages_created: 0,
            clients_managed: 0,
            avatar: self.avatar.filter(|a| !a.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Replaced by a fresh `passwordHash` in the service; never stored as-is.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages_created: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_managed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Validate for TeamMemberUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required_opt("fullName", self.full_name.as_deref())?;
        if let Some(email) = &self.email {
            validate::email(email)?;
        }
        validate::required_opt("phone", self.phone.as_deref())?;
        if let Some(username) = &self.username {
            check_username(username)?;
        }
        // An empty password in an edit form means "keep the current one".
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            check_password(password)?;
        }
        validate::required_opt("department", self.department.as_deref())
    }
}

impl TeamMemberUpdate {
    /// Bring submitted fields to their stored form.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.as_deref().map(validate::normalize_email);
        self
    }

    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_order() {
        assert!(Role::Admin > Role::Manager && Role::Manager > Role::Agent);
        assert!(Role::Admin.satisfies(Role::Manager));
        assert!(!Role::Agent.satisfies(Role::Manager));
        assert!(Role::Manager.satisfies(Role::Manager));
    }

    #[test]
    fn view_drops_password_hash() {
        let create: TeamMemberCreate = serde_json::from_value(json!({
            "fullName": "Priya Sharma",
            "email": "priya@example.com",
            "phone": "+91 76543 21098",
            "username": "priya_agent",
            "password": "agent12345",
            "department": "Sales",
            "joiningDate": "2024-03-10"
        }))
        .expect("shape");
        assert!(create.validate().is_ok());
        let member = create.into_member("$argon2id$stub".into());
        assert_eq!(member.role, Role::Agent);
        let v = serde_json::to_value(TeamMemberView::from(member)).expect("serialize");
        assert!(v.get(PASSWORD_HASH_FIELD).is_none());
        assert_eq!(v["joiningDate"], "2024-03-10T00:00:00.000Z");
    }

    #[test]
    fn short_password_rejected() {
        let upd = TeamMemberUpdate { password: Some("short".into()), ..Default::default() };
        assert!(upd.validate().is_err());
        let blank = TeamMemberUpdate { password: Some(String::new()), ..Default::default() };
        assert!(blank.validate().is_ok());
        assert_eq!(blank.new_password(), None);
    }

    #[test]
    fn password_never_in_changes() {
        let upd = TeamMemberUpdate { password: Some("longenough".into()), role: Some(Role::Manager), ..Default::default() };
        let set = crate::changes(&upd).expect("map");
        assert!(set.get("password").is_none());
        assert_eq!(set["role"], "manager");
    }
}
