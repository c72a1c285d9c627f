//! Singleton scheduling and company settings.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Settings, SettingsUpdate};
pub use service::SettingsService;
