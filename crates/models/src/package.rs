use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    #[default]
    Active,
    Inactive,
}

impl PackageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Active => "active",
            PackageStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
    pub group_size: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for Package {
    const COLLECTION: Collection = Collection::Packages;
    const LABEL: &'static str = "Package";

    fn id(&self) -> &str { &self.id }
}

fn default_category() -> String { "standard".into() }

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageCreate {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
    pub group_size: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub status: PackageStatus,
}

fn validate_itinerary(days: &[ItineraryDay]) -> Result<(), ModelError> {
    for d in days {
        validate::at_least("itinerary.day", i64::from(d.day), 1)?;
        validate::required("itinerary.title", &d.title)?;
    }
    Ok(())
}

impl Validate for PackageCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::required("description", &self.description)?;
        validate::required("duration", &self.duration)?;
        validate::required("groupSize", &self.group_size)?;
        validate::required("image", &self.image)?;
        validate::required("category", &self.category)?;
        validate::non_negative("price", self.price)?;
        validate_itinerary(&self.itinerary)
    }
}

impl PackageCreate {
    pub fn into_package(self) -> Package {
        let now = timestamp::now();
        Package {
            id: crate::new_id(),
            title: self.title,
            description: self.description,
            duration: self.duration,
            price: self.price,
            group_size: self.group_size,
            image: self.image,
            images: self.images,
            highlights: self.highlights,
            itinerary: self.itinerary,
            inclusions: self.inclusions,
            exclusions: self.exclusions,
            category: self.category,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Vec<ItineraryDay>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
}

impl Validate for PackageUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required_opt("title", self.title.as_deref())?;
        validate::required_opt("description", self.description.as_deref())?;
        validate::required_opt("duration", self.duration.as_deref())?;
        validate::required_opt("groupSize", self.group_size.as_deref())?;
        validate::required_opt("image", self.image.as_deref())?;
        validate::required_opt("category", self.category.as_deref())?;
        if let Some(price) = self.price {
            validate::non_negative("price", price)?;
        }
        if let Some(days) = &self.itinerary {
            validate_itinerary(days)?;
        }
        Ok(())
    }
}
