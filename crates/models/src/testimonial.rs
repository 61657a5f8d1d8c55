use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    Approved,
    #[default]
    Pending,
}

impl TestimonialStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub customer_name: String,
    pub location: String,
    pub rating: u8,
    pub review: String,
    pub package_name: String,
    /// Free-form display date, e.g. "March 2024".
    pub date: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: TestimonialStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;
    const LABEL: &'static str = "Testimonial";

    fn id(&self) -> &str { &self.id }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCreate {
    pub customer_name: String,
    pub location: String,
    /// Accepted as any integer so out-of-range values reach validation instead of failing to parse.
    pub rating: i64,
    pub review: String,
    pub package_name: String,
    pub date: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Validate for TestimonialCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("customerName", &self.customer_name)?;
        validate::required("location", &self.location)?;
        validate::in_range("rating", self.rating, 1, 5)?;
        validate::required("review", &self.review)?;
        validate::required("packageName", &self.package_name)?;
        validate::required("date", &self.date)
    }
}

impl TestimonialCreate {
    /// Call after [`Validate::validate`]; the rating is clamped into range otherwise.
    pub fn into_testimonial(self) -> Testimonial {
        let now = timestamp::now();
        Testimonial {
            id: crate::new_id(),
            customer_name: self.customer_name,
            location: self.location,
            rating: self.rating.clamp(1, 5) as u8,
            review: self.review,
            package_name: self.package_name,
            date: self.date,
            images: self.images,
            status: TestimonialStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestimonialStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

impl Validate for TestimonialUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required_opt("review", self.review.as_deref())?;
        if let Some(r) = self.rating {
            validate::in_range("rating", r, 1, 5)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(rating: i64) -> serde_json::Value {
        json!({
            "customerName": "Meera",
            "location": "Pune",
            "rating": rating,
            "review": "Shikara at sunset was unforgettable",
            "packageName": "Kashmir Valley Tour",
            "date": "March 2024"
        })
    }

    #[test]
    fn rating_bounds() {
        for bad in [0, 6, -3] {
            let input: TestimonialCreate = serde_json::from_value(body(bad)).expect("shape");
            assert!(input.validate().is_err(), "rating {bad} accepted");
        }
        for good in 1..=5 {
            let input: TestimonialCreate = serde_json::from_value(body(good)).expect("shape");
            assert!(input.validate().is_ok());
            assert_eq!(i64::from(input.into_testimonial().rating), good);
        }
    }

    #[test]
    fn submissions_start_pending() {
        let t = serde_json::from_value::<TestimonialCreate>(body(5)).expect("shape").into_testimonial();
        assert_eq!(t.status, TestimonialStatus::Pending);
    }

    #[test]
    fn update_rating_checked() {
        assert!(TestimonialUpdate { rating: Some(7), ..Default::default() }.validate().is_err());
        assert!(TestimonialUpdate { status: Some(TestimonialStatus::Approved), ..Default::default() }
            .validate()
            .is_ok());
    }
}
