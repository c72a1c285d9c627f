//! Service layer: business logic on top of `models`.
//! - Separates business logic from data access (repository traits with
//!   SeaORM and in-memory implementations).
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod settings;
pub mod booking;
pub mod notify;
pub mod db;
#[cfg(test)]
pub mod test_support;
