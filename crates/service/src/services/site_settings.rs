//! Singleton settings document, created with defaults on first read.

use models::changes;
use models::site_settings::{
    BusinessStats, CompanyInfo, ContactInfo, HeroSection, MapSettings, SeoSettings, SiteSettings, SiteSettingsUpdate,
    SocialMedia,
};
use models::Validate;
use once_cell::sync::Lazy;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::store::{repository::touch, DocumentStore, Filter, Repository};

/// Fixed id so concurrent first reads converge on one document.
pub const SETTINGS_ID: &str = "site-settings";

static DEFAULT_SECTIONS: Lazy<SiteSettingsUpdate> = Lazy::new(|| SiteSettingsUpdate {
    contact_info: Some(ContactInfo::default()),
    social_media: Some(SocialMedia::default()),
    company_info: Some(CompanyInfo::default()),
    hero_section: Some(HeroSection::default()),
    map_settings: Some(MapSettings::default()),
    seo_settings: Some(SeoSettings::default()),
    business_stats: Some(BusinessStats::default()),
});

#[instrument(skip_all)]
pub async fn get_or_create(store: &dyn DocumentStore) -> Result<SiteSettings, ServiceError> {
    let repo = Repository::<SiteSettings>::new(store);
    if let Some(existing) = repo.find_one(&Filter::new().eq("isActive", true)).await? {
        return Ok(existing);
    }
    let settings = SiteSettings { id: SETTINGS_ID.to_string(), ..SiteSettings::defaults() };
    match repo.insert(&settings).await {
        Ok(()) => {
            info!("default site settings created");
            Ok(settings)
        }
        // lost the race to another first read
        Err(ServiceError::Validation(_)) => repo.get(SETTINGS_ID).await,
        Err(e) => Err(e),
    }
}

/// Replace each section present in `input`.
pub async fn update(store: &dyn DocumentStore, input: SiteSettingsUpdate) -> Result<SiteSettings, ServiceError> {
    input.validate()?;
    let current = get_or_create(store).await?;
    let set = touch(changes(&input)?);
    let updated = Repository::<SiteSettings>::new(store).update(&current.id, set).await?;
    info!("site_settings_updated");
    Ok(updated)
}

/// Restore every section to its default.
pub async fn reset(store: &dyn DocumentStore) -> Result<SiteSettings, ServiceError> {
    let current = get_or_create(store).await?;
    let set = touch(changes(&*DEFAULT_SECTIONS)?);
    let settings = Repository::<SiteSettings>::new(store).update(&current.id, set).await?;
    info!("site_settings_reset");
    Ok(settings)
}
