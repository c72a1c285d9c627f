use thiserror::Error;

use models::errors::ModelError;

use crate::errors::StoreTimeout;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("admin already exists: {0}")]
    Conflict(String),
    #[error("registration is disabled")]
    RegistrationDisabled,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict(_) => 1002,
            AuthError::RegistrationDisabled => 1003,
            AuthError::Unauthenticated => 1004,
            AuthError::InvalidCredentials => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
            AuthError::StoreUnavailable(_) => 1201,
        }
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => AuthError::Validation(m),
            ModelError::Conflict(m) => AuthError::Conflict(m),
            ModelError::Unavailable(m) => AuthError::StoreUnavailable(m),
            ModelError::Db(m) => AuthError::Repository(m),
        }
    }
}

impl From<StoreTimeout> for AuthError {
    fn from(e: StoreTimeout) -> Self { AuthError::StoreUnavailable(e.to_string()) }
}
