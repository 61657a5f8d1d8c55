//! Concrete account repositories.

pub mod store;

pub use store::StoreAccountRepository;
