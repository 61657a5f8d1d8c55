use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::booking::{Booking, BookingStatus};
use crate::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking {
    pub id: String,
    pub customer: String,
    pub package: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl From<&Booking> for RecentBooking {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id.clone(),
            customer: b.customer_name.clone(),
            package: b.package_title.clone(),
            date: b.travel_date,
            status: b.status,
        }
    }
}

/// Admin dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_packages: u64,
    pub active_bookings: u64,
    pub cab_bookings: u64,
    pub customer_reviews: u64,
    pub monthly_revenue: f64,
    pub recent_bookings: Vec<RecentBooking>,
}
