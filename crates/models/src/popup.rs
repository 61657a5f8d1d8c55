use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PopupType {
    #[default]
    Offer,
    Announcement,
    Newsletter,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub popup_type: PopupType,
    /// Empty means every page.
    #[serde(default)]
    pub show_on_pages: Vec<String>,
    pub display_delay_seconds: u32,
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Popup {
    /// Active and inside its (optional) date window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.start_date.map_or(true, |s| s <= now)
            && self.end_date.map_or(true, |e| now <= e)
    }

    pub fn shows_on(&self, page: &str) -> bool {
        self.show_on_pages.is_empty() || self.show_on_pages.iter().any(|p| p == page)
    }
}

impl Resource for Popup {
    const COLLECTION: Collection = Collection::Popups;
    const LABEL: &'static str = "Popup";

    fn id(&self) -> &str { &self.id }
}

fn default_delay() -> u32 { 3 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopupCreate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub popup_type: PopupType,
    #[serde(default)]
    pub show_on_pages: Vec<String>,
    #[serde(default = "default_delay")]
    pub display_delay_seconds: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub end_date: Option<DateTime<Utc>>,
}

fn check_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<(), ModelError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(ModelError::invalid("endDate must not precede startDate")),
        _ => Ok(()),
    }
}

impl Validate for PopupCreate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::required("content", &self.content)?;
        check_window(self.start_date, self.end_date)
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl PopupCreate {
    pub fn into_popup(self) -> Popup {
        let now = timestamp::now();
        Popup {
            id: crate::new_id(),
            title: self.title,
            content: self.content,
            image_url: non_blank(self.image_url),
            button_text: non_blank(self.button_text),
            button_link: non_blank(self.button_link),
            popup_type: self.popup_type,
            show_on_pages: self.show_on_pages,
            display_delay_seconds: self.display_delay_seconds,
            is_active: self.is_active,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_type: Option<PopupType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_pages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_delay_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Validate for PopupUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        validate::required_opt("title", self.title.as_deref())?;
        validate::required_opt("content", self.content.as_deref())?;
        check_window(self.start_date, self.end_date)
    }
}

impl PopupUpdate {
    pub fn check_against(&self, current: &Popup) -> Result<(), ModelError> {
        check_window(self.start_date.or(current.start_date), self.end_date.or(current.end_date))
    }
}
