//! Resource documents for the travel site and the request shapes that create or change them.
//!
//! Every type here is plain data: JSON field names are camelCase, and create/update shapes carry
//! their own validation through [`Validate`].

pub mod errors;
pub mod timestamp;
pub mod validate;
pub mod catalog;

pub mod account;
pub mod booking;
pub mod cab_booking;
pub mod contact;
pub mod gallery;
pub mod package;
pub mod popup;
pub mod site_settings;
pub mod stats;
pub mod testimonial;

pub use catalog::{Collection, IndexSpec, Resource, INDEXES};
pub use errors::ModelError;
pub use validate::{changes, Validate};

/// Fresh document id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
