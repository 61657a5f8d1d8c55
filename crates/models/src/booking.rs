use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

/// Lifecycle shared by package bookings and cab bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    #[default]
    Package,
    Cab,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    /// Not checked against the packages collection.
    #[serde(default)]
    pub package_id: Option<String>,
    pub package_title: String,
    #[serde(with = "timestamp")]
    pub travel_date: DateTime<Utc>,
    pub travelers: u32,
    pub total_amount: f64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub booking_type: BookingType,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for Booking {
    const COLLECTION: Collection = Collection::Bookings;
    const LABEL: &'static str = "Booking";

    fn id(&self) -> &str { &self.id }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub package_id: Option<String>,
    pub package_title: String,
    #[serde(with = "timestamp")]
    pub travel_date: DateTime<Utc>,
    pub travelers: u32,
    pub total_amount: f64,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub booking_type: BookingType,
}

impl Validate for BookingCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("customerName", &self.customer_name)?;
        validate::email(&self.email)?;
        validate::required("phone", &self.phone)?;
        validate::required("packageTitle", &self.package_title)?;
        validate::at_least("travelers", i64::from(self.travelers), 1)?;
        validate::non_negative("totalAmount", self.total_amount)
    }
}

impl BookingCreate {
    pub fn into_booking(self) -> Booking {
        let now = timestamp::now();
        Booking {
            id: crate::new_id(),
            customer_name: self.customer_name,
            email: self.email.trim().to_string(),
            phone: self.phone,
            package_id: self.package_id.filter(|id| !id.trim().is_empty()),
            package_title: self.package_title,
            travel_date: self.travel_date,
            travelers: self.travelers,
            total_amount: self.total_amount,
            status: BookingStatus::Pending,
            special_requests: self.special_requests,
            booking_type: self.booking_type,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl Validate for BookingUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        if let Some(t) = self.travelers {
            validate::at_least("travelers", i64::from(t), 1)?;
        }
        if let Some(a) = self.total_amount {
            validate::non_negative("totalAmount", a)?;
        }
        Ok(())
    }
}
