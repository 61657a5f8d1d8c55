use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

pub const DEFAULT_CATEGORY: &str = "gallery";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for GalleryImage {
    const COLLECTION: Collection = Collection::GalleryImages;
    const LABEL: &'static str = "Image";

    fn id(&self) -> &str { &self.id }
}

/// Metadata that arrives alongside an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct ImageCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl ImageCreate {
    /// Split a comma separated tag list, dropping blanks.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
    }

    pub fn into_image(self, image_url: String) -> GalleryImage {
        let now = timestamp::now();
        let category = if self.category.trim().is_empty() { DEFAULT_CATEGORY.to_string() } else { self.category };
        GalleryImage {
            id: crate::new_id(),
            title: self.title,
            description: self.description,
            image_url,
            category,
            tags: self.tags,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for ImageCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Validate for GalleryImageUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required_opt("title", self.title.as_deref())?;
        validate::required_opt("category", self.category.as_deref())
    }
}
