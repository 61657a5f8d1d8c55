use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Replied,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub inquiry_type: String,
    pub message: String,
    pub preferred_contact: String,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for ContactInquiry {
    const COLLECTION: Collection = Collection::ContactInquiries;
    const LABEL: &'static str = "Inquiry";

    fn id(&self) -> &str { &self.id }
}

fn default_inquiry_type() -> String { "general".into() }
fn default_preferred_contact() -> String { "email".into() }

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    #[serde(default = "default_inquiry_type")]
    pub inquiry_type: String,
    pub message: String,
    #[serde(default = "default_preferred_contact")]
    pub preferred_contact: String,
}

impl Validate for ContactCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("name", &self.name)?;
        validate::email(&self.email)?;
        validate::required("phone", &self.phone)?;
        validate::required("subject", &self.subject)?;
        validate::required("message", &self.message)
    }
}

impl ContactCreate {
    pub fn into_inquiry(self) -> ContactInquiry {
        let now = timestamp::now();
        ContactInquiry {
            id: crate::new_id(),
            name: self.name,
            email: self.email.trim().to_string(),
            phone: self.phone,
            subject: self.subject,
            inquiry_type: self.inquiry_type,
            message: self.message,
            preferred_contact: self.preferred_contact,
            status: InquiryStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactUpdate {
    pub status: InquiryStatus,
}

impl Validate for ContactUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}
