use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// JSON error body `{"error": kind, "details": message?}` with its status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub details: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, kind: &'static str, details: Option<String>) -> Self {
        Self { status, kind, details }
    }

    pub fn validation(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationError", Some(details.into()))
    }

    /// The one response every auth-gate failure produces.
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthenticated", None)
    }

    fn internal(source: &dyn std::fmt::Display) -> Self {
        error!(error = %source, "internal_error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalError", None)
    }

    fn unavailable(source: &dyn std::fmt::Display) -> Self {
        warn!(error = %source, "store_unavailable");
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "StoreUnavailable", Some("temporarily unavailable, retry later".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(d) => serde_json::json!({ "error": self.kind, "details": d }),
            None => serde_json::json!({ "error": self.kind }),
        };
        let mut resp = (self.status, Json(body)).into_response();
        if self.status == StatusCode::SERVICE_UNAVAILABLE {
            resp.headers_mut().insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        resp
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::Validation(m) => Self::validation(m.clone()),
            ServiceError::SlotConflict { .. } => Self::new(StatusCode::CONFLICT, "SlotConflict", Some(e.to_string())),
            ServiceError::InvalidTransition { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "InvalidTransition", Some(e.to_string()))
            }
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "NotFound", Some(m.clone())),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", Some(m.clone())),
            ServiceError::StoreUnavailable(_) => Self::unavailable(&e),
            ServiceError::Db(_) => Self::internal(&e),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match &e {
            AuthError::Validation(m) => Self::validation(m.clone()),
            AuthError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", Some(m.clone())),
            AuthError::RegistrationDisabled => Self::new(StatusCode::FORBIDDEN, "RegistrationDisabled", None),
            AuthError::Unauthenticated => Self::unauthenticated(),
            AuthError::InvalidCredentials => Self::new(StatusCode::UNAUTHORIZED, "InvalidCredentials", None),
            AuthError::StoreUnavailable(_) => Self::unavailable(&e),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => Self::internal(&e),
        }
    }
}
