//! The singleton site settings document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Collection, Resource};
use crate::errors::ModelError;
use crate::timestamp;
use crate::validate::{self, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub address: Vec<String>,
    pub working_hours: Vec<String>,
    pub whatsapp: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: vec!["+91 98765 43210".into(), "+91 98765 43211".into()],
            email: vec!["info@gmbtravelskashmir.com".into(), "bookings@gmbtravelskashmir.com".into()],
            address: vec!["Main Office: Srinagar, Kashmir, India".into()],
            working_hours: vec!["Mon - Sat: 9:00 AM - 8:00 PM".into(), "Sun: 10:00 AM - 6:00 PM".into()],
            whatsapp: "+919876543210".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub description: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "G.M.B Travels Kashmir".into(),
            tagline: "Discover Paradise on Earth".into(),
            description: "Curated tours, houseboat stays and cab services across Kashmir.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub background_image: String,
    pub cta_text: String,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            title: "Experience the Magic of Kashmir".into(),
            subtitle: "Snow-capped peaks, serene lakes and timeless valleys".into(),
            background_image: String::new(),
            cta_text: "Explore Packages".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub embed_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        // Srinagar
        Self { latitude: 34.0837, longitude: 74.7973, zoom: 12, embed_url: String::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoSettings {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            meta_title: "G.M.B Travels Kashmir - Discover Paradise on Earth".into(),
            meta_description: "Kashmir tour packages, houseboats and cab bookings.".into(),
            keywords: vec!["kashmir tours".into(), "srinagar".into(), "gulmarg".into(), "pahalgam".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessStats {
    pub happy_customers: String,
    pub tour_packages: String,
    pub years_experience: String,
    pub customer_rating: String,
}

impl Default for BusinessStats {
    fn default() -> Self {
        Self {
            happy_customers: "500+".into(),
            tour_packages: "50+".into(),
            years_experience: "10+".into(),
            customer_rating: "4.9".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub id: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub hero_section: HeroSection,
    #[serde(default)]
    pub map_settings: MapSettings,
    #[serde(default)]
    pub seo_settings: SeoSettings,
    #[serde(default)]
    pub business_stats: BusinessStats,
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    /// Fresh active document holding the built-in defaults.
    pub fn defaults() -> Self {
        let now = timestamp::now();
        Self {
            id: crate::new_id(),
            contact_info: ContactInfo::default(),
            social_media: SocialMedia::default(),
            company_info: CompanyInfo::default(),
            hero_section: HeroSection::default(),
            map_settings: MapSettings::default(),
            seo_settings: SeoSettings::default(),
            business_stats: BusinessStats::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Resource for SiteSettings {
    const COLLECTION: Collection = Collection::SiteSettings;
    const LABEL: &'static str = "Site settings";

    fn id(&self) -> &str { &self.id }
}

/// Each present section replaces the stored section as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_section: Option<HeroSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_settings: Option<MapSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_settings: Option<SeoSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_stats: Option<BusinessStats>,
}

impl Validate for SiteSettingsUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        if let Some(company) = &self.company_info {
            validate::required("companyInfo.name", &company.name)?;
        }
        if let Some(contact) = &self.contact_info {
            for e in &contact.email {
                validate::email(e)?;
            }
        }
        if let Some(map) = &self.map_settings {
            if !(-90.0..=90.0).contains(&map.latitude) || !(-180.0..=180.0).contains(&map.longitude) {
                return Err(ModelError::invalid("mapSettings coordinates out of range"));
            }
            validate::in_range("mapSettings.zoom", i64::from(map.zoom), 1, 20)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_carry_company_identity() {
        let s = SiteSettings::defaults();
        assert_eq!(s.company_info.name, "G.M.B Travels Kashmir");
        assert_eq!(s.company_info.tagline, "Discover Paradise on Earth");
        assert!(s.is_active);
        let v = serde_json::to_value(&s).expect("serialize");
        for key in ["contactInfo", "socialMedia", "companyInfo", "heroSection", "mapSettings", "seoSettings", "businessStats"] {
            assert!(v.get(key).is_some(), "{key} missing");
        }
    }

    #[test]
    fn partial_section_fills_from_defaults() {
        let upd: SiteSettingsUpdate = serde_json::from_value(json!({
            "companyInfo": {"name": "G.M.B Travels Kashmir - Updated"}
        }))
        .expect("shape");
        assert!(upd.validate().is_ok());
        let company = upd.company_info.expect("present");
        assert_eq!(company.tagline, "Discover Paradise on Earth");
        assert!(upd.hero_section.is_none());
    }

    #[test]
    fn bad_contact_email_rejected() {
        let upd: SiteSettingsUpdate =
            serde_json::from_value(json!({"contactInfo": {"email": ["nope"]}})).expect("shape");
        assert!(upd.validate().is_err());
    }
}
