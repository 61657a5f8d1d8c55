use models::testimonial::{Testimonial, TestimonialCreate, TestimonialStatus, TestimonialUpdate};
use tracing::{info, instrument};

use super::{apply_update, insert_new, CREATED_AT};
use crate::errors::ServiceError;
use crate::store::{DocumentStore, Filter, FindOptions, Repository};

/// Approved testimonials, newest first.
pub async fn list_approved(store: &dyn DocumentStore) -> Result<Vec<Testimonial>, ServiceError> {
    Repository::<Testimonial>::new(store)
        .list(
            &Filter::new().eq("status", TestimonialStatus::Approved.as_str()),
            &FindOptions::new().sort_desc(CREATED_AT),
        )
        .await
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Testimonial>, ServiceError> {
    Repository::<Testimonial>::new(store).list(&Filter::new(), &FindOptions::new().sort_desc(CREATED_AT)).await
}

/// Public submission; held as pending until approved.
#[instrument(skip_all, fields(rating = input.rating))]
pub async fn create(store: &dyn DocumentStore, input: TestimonialCreate) -> Result<Testimonial, ServiceError> {
    let t = insert_new(store, input, TestimonialCreate::into_testimonial).await?;
    info!(id = %t.id, "testimonial_submitted");
    Ok(t)
}

pub async fn update(store: &dyn DocumentStore, id: &str, input: TestimonialUpdate) -> Result<Testimonial, ServiceError> {
    apply_update(store, id, &input).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), ServiceError> {
    Repository::<Testimonial>::new(store).delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;
    use serde_json::json;

    fn input(rating: i64) -> Result<TestimonialCreate, serde_json::Error> {
        serde_json::from_value(json!({
            "customerName": "Meera",
            "location": "Pune",
            "rating": rating,
            "review": "Lovely",
            "packageName": "Valley Tour",
            "date": "2024-06"
        }))
    }

    #[tokio::test]
    async fn out_of_range_rating_never_stored() -> Result<(), anyhow::Error> {
        let store = memory_store();
        assert!(matches!(create(store.as_ref(), input(6)?).await, Err(ServiceError::Model(_))));
        assert!(list_all(store.as_ref()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn approval_publishes() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let t = create(store.as_ref(), input(4)?).await?;
        assert_eq!(t.rating, 4);
        assert!(list_approved(store.as_ref()).await?.is_empty());

        let upd = TestimonialUpdate { status: Some(TestimonialStatus::Approved), ..Default::default() };
        update(store.as_ref(), &t.id, upd).await?;
        let public = list_approved(store.as_ref()).await?;
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].rating, 4);
        Ok(())
    }
}
