use models::popup::{Popup, PopupCreate, PopupUpdate};
use models::{timestamp, Validate};
use serde_json::Value;
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{repository::touch, Document, DocumentStore, Filter, FindOptions, Repository};

/// Popups to show right now, optionally only those targeting `page`.
pub async fn list_live(store: &dyn DocumentStore, page: Option<&str>) -> Result<Vec<Popup>, ServiceError> {
    let now = timestamp::now();
    let active = Repository::<Popup>::new(store)
        .list(&Filter::new().eq("isActive", true), &FindOptions::new().sort_desc(CREATED_AT))
        .await?;
    let page = page.map(str::trim).filter(|p| !p.is_empty());
    Ok(active
        .into_iter()
        .filter(|p| p.is_live(now))
        .filter(|p| page.map_or(true, |pg| p.shows_on(pg)))
        .collect())
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Popup>, ServiceError> {
    Repository::<Popup>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<Popup, ServiceError> {
    Repository::<Popup>::new(store).get(id).await
}

#[instrument(skip_all, fields(title = %input.title))]
pub async fn create(store: &dyn DocumentStore, input: PopupCreate) -> Result<Popup, ServiceError> {
    let popup = insert_new(store, input, PopupCreate::into_popup).await?;
    info!(id = %popup.id, "popup_created");
    Ok(popup)
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: PopupUpdate) -> Result<Popup, ServiceError> {
    input.validate()?;
    if input.start_date.is_some() || input.end_date.is_some() {
        input.check_against(&get(store, id).await?)?;
    }
    apply_update(store, id, &input).await
}

/// Flip `isActive`.
pub async fn toggle(store: &dyn DocumentStore, id: &str) -> Result<Popup, ServiceError> {
    let current = get(store, id).await?;
    let mut set = Document::new();
    set.insert("isActive".into(), Value::Bool(!current.is_active));
    let popup = Repository::<Popup>::new(store).update(id, touch(set)).await?;
    info!(%id, active = popup.is_active, "popup_toggled");
    Ok(popup)
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<Popup>::new(store).delete(id).await
}
