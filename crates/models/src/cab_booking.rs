use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::booking::BookingStatus;
use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Oneway,
    Roundtrip,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CabBooking {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(with = "timestamp")]
    pub pickup_date: DateTime<Utc>,
    pub pickup_time: String,
    #[serde(default, with = "timestamp::option")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub return_time: Option<String>,
    pub trip_type: TripType,
    pub vehicle_type: String,
    pub passengers: u32,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for CabBooking {
    const COLLECTION: Collection = Collection::CabBookings;
    const LABEL: &'static str = "Cab booking";

    fn id(&self) -> &str { &self.id }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CabBookingCreate {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(with = "timestamp")]
    pub pickup_date: DateTime<Utc>,
    pub pickup_time: String,
    #[serde(default, with = "timestamp::option")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub return_time: Option<String>,
    pub trip_type: TripType,
    pub vehicle_type: String,
    pub passengers: u32,
    #[serde(default)]
    pub special_requests: String,
}

fn check_return(pickup: DateTime<Utc>, ret: Option<DateTime<Utc>>) -> Result<(), ModelError> {
    match ret {
        Some(r) if r < pickup => Err(ModelError::invalid("returnDate must not precede pickupDate")),
        _ => Ok(()),
    }
}

impl Validate for CabBookingCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("customerName", &self.customer_name)?;
        validate::email(&self.email)?;
        validate::required("phone", &self.phone)?;
        validate::required("pickupLocation", &self.pickup_location)?;
        validate::required("pickupTime", &self.pickup_time)?;
        validate::required("vehicleType", &self.vehicle_type)?;
        validate::at_least("passengers", i64::from(self.passengers), 1)?;
        if self.trip_type == TripType::Roundtrip && self.return_date.is_none() {
            return Err(ModelError::invalid("returnDate is required for a roundtrip"));
        }
        check_return(self.pickup_date, self.return_date)
    }
}

impl CabBookingCreate {
    pub fn into_cab_booking(self) -> CabBooking {
        let now = timestamp::now();
        CabBooking {
            id: crate::new_id(),
            customer_name: self.customer_name,
            email: self.email.trim().to_string(),
            phone: self.phone,
            pickup_location: self.pickup_location,
            drop_location: self.drop_location,
            pickup_date: self.pickup_date,
            pickup_time: self.pickup_time,
            return_date: self.return_date,
            return_time: self.return_time.filter(|t| !t.trim().is_empty()),
            trip_type: self.trip_type,
            vehicle_type: self.vehicle_type,
            passengers: self.passengers,
            special_requests: self.special_requests,
            status: BookingStatus::Pending,
            estimated_cost: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CabBookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
}

impl Validate for CabBookingUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        if let Some(cost) = self.estimated_cost {
            validate::non_negative("estimatedCost", cost)?;
        }
        validate::required_opt("pickupTime", self.pickup_time.as_deref())?;
        validate::required_opt("vehicleType", self.vehicle_type.as_deref())?;
        if let Some(pickup) = self.pickup_date {
            check_return(pickup, self.return_date)?;
        }
        Ok(())
    }
}

impl CabBookingUpdate {
    /// Date ordering against the stored booking once both sides are known.
    pub fn check_against(&self, current: &CabBooking) -> Result<(), ModelError> {
        let pickup = self.pickup_date.unwrap_or(current.pickup_date);
        let ret = self.return_date.or(current.return_date);
        check_return(pickup, ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(trip: &str) -> serde_json::Value {
        json!({
            "customerName": "Imran",
            "email": "imran@example.com",
            "phone": "9000000000",
            "pickupLocation": "Srinagar Airport",
            "pickupDate": "2025-03-10",
            "pickupTime": "09:30",
            "tripType": trip,
            "vehicleType": "Innova",
            "passengers": 4
        })
    }

    #[test]
    fn roundtrip_requires_return_date() {
        let input: CabBookingCreate = serde_json::from_value(body("roundtrip")).expect("shape");
        assert!(input.validate().is_err());

        let mut b = body("roundtrip");
        b["returnDate"] = json!("2025-03-12");
        let input: CabBookingCreate = serde_json::from_value(b).expect("shape");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn return_before_pickup_rejected() {
        let mut b = body("oneway");
        b["returnDate"] = json!("2025-03-01");
        let input: CabBookingCreate = serde_json::from_value(b).expect("shape");
        assert!(input.validate().is_err());
    }

    #[test]
    fn new_cab_booking_defaults() {
        let input: CabBookingCreate = serde_json::from_value(body("local")).expect("shape");
        let cab = input.into_cab_booking();
        assert_eq!(cab.status, BookingStatus::Pending);
        assert_eq!(cab.estimated_cost, 0.0);
        assert_eq!(cab.drop_location, "");
        let v = serde_json::to_value(&cab).expect("serialize");
        assert_eq!(v["tripType"], "local");
        assert!(v["returnDate"].is_null());
    }

    #[test]
    fn update_checked_against_stored_pickup() {
        let cab = serde_json::from_value::<CabBookingCreate>(body("oneway")).expect("shape").into_cab_booking();
        let upd: CabBookingUpdate = serde_json::from_value(json!({"returnDate": "2025-03-01"})).expect("shape");
        assert!(upd.validate().is_ok());
        assert!(upd.check_against(&cab).is_err());
    }
}
