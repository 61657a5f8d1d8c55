use models::gallery::{GalleryImage, GalleryImageUpdate, ImageCreate};
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

/// Active images, optionally narrowed to one category.
pub async fn list_active(store: &dyn DocumentStore, category: Option<&str>) -> Result<Vec<GalleryImage>, ServiceError> {
    let mut filter = Filter::new().eq("isActive", true);
    if let Some(c) = category.map(str::trim).filter(|c| !c.is_empty()) {
        filter = filter.eq("category", c);
    }
    Repository::<GalleryImage>::new(store).list(&filter, &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<GalleryImage>, ServiceError> {
    Repository::<GalleryImage>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

/// Record an already stored file under `image_url`.
#[instrument(skip_all, fields(title = %meta.title, %image_url))]
pub async fn create(store: &dyn DocumentStore, meta: ImageCreate, image_url: String) -> Result<GalleryImage, ServiceError> {
    let image = insert_new(store, meta, |m| m.into_image(image_url)).await?;
    info!(id = %image.id, "image_recorded");
    Ok(image)
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: GalleryImageUpdate) -> Result<GalleryImage, ServiceError> {
    apply_update(store, id, &input).await
}

/// Remove the record and hand it back so the caller can drop the file.
pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<GalleryImage, ServiceError> {
    let repo = Repository::<GalleryImage>::new(store);
    let image = repo.get(id).await?;
    repo.delete(id).await?;
    Ok(image)
}
