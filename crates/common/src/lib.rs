//! Shared building blocks used by every crate in the workspace.
//!
//! - `types`: small HTTP-facing payloads (health, pagination metadata).
//! - `utils::logging`: one-shot tracing subscriber initialisation.

pub mod types;
pub mod utils;
