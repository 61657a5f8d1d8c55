use chrono::{Datelike, TimeZone, Utc};
use models::booking::{Booking, BookingStatus};
use models::package::{Package, PackageStatus};
use models::stats::{DashboardStats, RecentBooking};
use models::testimonial::{Testimonial, TestimonialStatus};
use models::cab_booking::CabBooking;
use tracing::instrument;

use super::CREATED_AT;
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

pub const RECENT_BOOKINGS: u64 = 5;

#[instrument(skip_all)]
pub async fn dashboard(store: &dyn DocumentStore) -> Result<DashboardStats, ServiceError> {
    let bookings = Repository::<Booking>::new(store);
    let confirmed = Filter::new().eq("status", BookingStatus::Confirmed.as_str());

    let total_packages = Repository::<Package>::new(store)
        .count(&Filter::new().eq("status", PackageStatus::Active.as_str()))
        .await?;
    let active_bookings = bookings.count(&confirmed).await?;
    let cab_bookings = Repository::<CabBooking>::new(store).count(&Filter::new()).await?;
    let customer_reviews = Repository::<Testimonial>::new(store)
        .count(&Filter::new().eq("status", TestimonialStatus::Approved.as_str()))
        .await?;

    let now = Utc::now();
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let monthly_revenue: f64 = bookings
        .list(&confirmed, &FindOptions::new())
        .await?
        .iter()
        .filter(|b| b.created_at >= month_start)
        .map(|b| b.total_amount)
        .sum();

    let recent_bookings: Vec<RecentBooking> = bookings
        .list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT).limit(RECENT_BOOKINGS))
        .await?
        .iter()
        .map(RecentBooking::from)
        .collect();

    Ok(DashboardStats { total_packages, active_bookings, cab_bookings, customer_reviews, monthly_revenue, recent_bookings })
}
