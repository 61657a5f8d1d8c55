//! Service layer for the travel site.
//! - `store`: the document persistence adapter and its backends.
//! - `auth`: credentials, tokens, role gate and revocation.
//! - `services`: per-resource business operations built on the store.

pub mod errors;
pub mod auth;
pub mod store;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use store::{connect, DocumentStore};
