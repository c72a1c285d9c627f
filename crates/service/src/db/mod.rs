//! Plain CRUD services over the `models` entities.

pub mod contact_service;
pub mod newsletter_service;
pub mod blog_service;
pub mod stats_service;
