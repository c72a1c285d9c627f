use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use models::errors::ModelError;

use crate::booking::domain::BookingStatus;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("time slot {time_slot} on {date} is already booked")]
    SlotConflict { date: String, time_slot: String },
    #[error("cannot move booking from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 2001,
            ServiceError::SlotConflict { .. } => 2002,
            ServiceError::InvalidTransition { .. } => 2003,
            ServiceError::NotFound(_) => 2004,
            ServiceError::Conflict(_) => 2005,
            ServiceError::StoreUnavailable(_) => 2101,
            ServiceError::Db(_) => 2200,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::StoreUnavailable(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Unavailable(m) => ServiceError::StoreUnavailable(m),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::from(e).into()
    }
}

/// A store call ran past its deadline.
#[derive(Debug, Error)]
#[error("store call exceeded {0:?}")]
pub struct StoreTimeout(pub Duration);

impl From<StoreTimeout> for ServiceError {
    fn from(e: StoreTimeout) -> Self { ServiceError::StoreUnavailable(e.to_string()) }
}

/// Run one store call under `limit`, converting an elapsed deadline into the
/// caller's error type.
pub async fn bounded<T, E, F>(limit: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<StoreTimeout>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "store_call_timed_out");
            Err(StoreTimeout(limit).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_maps_elapsed_deadline_to_unavailable() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, ServiceError>(1)
        };
        let err = bounded(Duration::from_millis(10), slow).await.unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn bounded_passes_through_results() {
        let ok = bounded(Duration::from_secs(1), async { Ok::<_, ServiceError>(7) }).await.unwrap();
        assert_eq!(ok, 7);
        let err = bounded(Duration::from_secs(1), async { Err::<u8, _>(ServiceError::not_found("booking")) }).await.unwrap_err();
        assert_eq!(err.code(), 2004);
    }

    #[test]
    fn model_errors_map_to_service_kinds() {
        assert!(matches!(ServiceError::from(ModelError::Unavailable("x".into())), ServiceError::StoreUnavailable(_)));
        assert!(matches!(ServiceError::from(ModelError::Validation("x".into())), ServiceError::Validation(_)));
        assert!(matches!(ServiceError::from(ModelError::Conflict("x".into())), ServiceError::Conflict(_)));
    }
}
