use models::package::{Package, PackageCreate, PackageStatus, PackageUpdate};
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

/// Public listing cap.
pub const PUBLIC_LIMIT: u64 = 100;

fn active() -> Filter {
    Filter::new().eq("status", PackageStatus::Active.as_str())
}

/// Active packages, newest first.
pub async fn list_public(store: &dyn DocumentStore) -> Result<Vec<Package>, ServiceError> {
    Repository::<Package>::new(store)
        .list(&active(), &FindOptions::new().sort_desc(CREATED_AT).limit(PUBLIC_LIMIT))
        .await
}

/// An active package; inactive ones read as missing.
pub async fn get_public(store: &dyn DocumentStore, id: &str) -> Result<Package, ServiceError> {
    Repository::<Package>::new(store)
        .find_one(&active().eq("id", id))
        .await?
        .ok_or_else(|| ServiceError::not_found("Package"))
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Package>, ServiceError> {
    Repository::<Package>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> Result<Package, ServiceError> {
    Repository::<Package>::new(store).get(id).await
}

#[instrument(skip_all, fields(title = %input.title))]
pub async fn create(store: &dyn DocumentStore, input: PackageCreate) -> Result<Package, ServiceError> {
    let pkg = insert_new(store, input, PackageCreate::into_package).await?;
    info!(id = %pkg.id, "package_created");
    Ok(pkg)
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: PackageUpdate) -> Result<Package, ServiceError> {
    apply_update(store, id, &input).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<Package>::new(store).delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;
    use serde_json::json;

    fn input(title: &str) -> Result<PackageCreate, serde_json::Error> {
        serde_json::from_value(json!({
            "title": title,
            "description": "d",
            "duration": "3 Days",
            "price": 9999,
            "groupSize": "2-8",
            "image": "/uploads/x.jpg"
        }))
    }

    #[tokio::test]
    async fn inactive_packages_leave_public_listing_only() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let pkg = create(store.as_ref(), input("Pahalgam Meadows")?).await?;
        assert!(list_public(store.as_ref()).await?.iter().any(|p| p.id == pkg.id));

        let upd = PackageUpdate { status: Some(PackageStatus::Inactive), ..Default::default() };
        let updated = update(store.as_ref(), &pkg.id, upd).await?;
        assert_eq!(updated.status, PackageStatus::Inactive);
        assert!(updated.updated_at >= pkg.updated_at);

        assert!(list_public(store.as_ref()).await?.is_empty());
        assert!(matches!(get_public(store.as_ref(), &pkg.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(list_all(store.as_ref()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn public_listing_is_newest_first() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let first = create(store.as_ref(), input("First")?).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = create(store.as_ref(), input("Second")?).await?;
        let ids: Vec<_> = list_public(store.as_ref()).await?.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_update_and_missing_ids() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let pkg = create(store.as_ref(), input("Gulmarg")?).await?;
        let bad = PackageUpdate { price: Some(-5.0), ..Default::default() };
        assert!(matches!(update(store.as_ref(), &pkg.id, bad).await, Err(ServiceError::Model(_))));
        assert!(matches!(delete(store.as_ref(), "nope").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(update(store.as_ref(), "nope", PackageUpdate::default()).await, Err(ServiceError::NotFound(_))));
        delete(store.as_ref(), &pkg.id).await?;
        assert!(matches!(get(store.as_ref(), &pkg.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
