//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password hashing, token issuance and verification, the role gate and
//! token revocation live here, independent of the HTTP layer.

pub mod denylist;
pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AuthService;
