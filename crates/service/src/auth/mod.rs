//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin registration, login, token issuance and bearer-token resolution.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
