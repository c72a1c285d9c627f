use std::sync::Arc;
use std::time::Duration;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::Utc;
use once_cell::sync::Lazy;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, debug, warn, instrument};
use uuid::Uuid;

use models::validate::{validate_email, validate_max_len, validate_required};

use super::domain::{AdminProfile, AdminRecord, AuthSession, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::errors::bounded;

/// Verified against when the username is unknown, so a miss costs the same Argon2 work as a hit.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("not-a-real-password").ok());

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub allow_registration: bool,
    pub min_password_len: usize,
    pub store_timeout: Duration,
}

impl AuthConfig {
    /// Defaults (7-day tokens, registration open) around the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            token_ttl: chrono::Duration::days(7),
            allow_registration: true,
            min_password_len: 6,
            store_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_app(cfg: &configs::AppConfig) -> Self {
        Self {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            token_ttl: chrono::Duration::days(cfg.auth.token_ttl_days),
            allow_registration: cfg.auth.allow_registration,
            min_password_len: cfg.auth.min_password_len,
            store_timeout: cfg.store.timeout(),
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Self-service registration; refused when registration is switched off.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::with_secret("secret"));
    /// let input = RegisterInput { username: "owner".into(), email: "owner@example.com".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.admin.username, "owner");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username, email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        if !self.cfg.allow_registration {
            return Err(AuthError::RegistrationDisabled);
        }
        let admin = self.create_admin(input).await?;
        let token = self.issue_token(admin.id)?;
        Ok(AuthSession { admin, token })
    }

    /// Create an admin regardless of the registration switch (setup tooling).
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_admin(&self, input: RegisterInput) -> Result<AdminProfile, AuthError> {
        let username = input.username.trim();
        validate_required("username", username)?;
        validate_max_len("username", username, 255)?;
        let email = input.email.trim();
        validate_email(email)?;
        if input.password.chars().count() < self.cfg.min_password_len {
            return Err(AuthError::Validation(format!(
                "password must be at least {} characters",
                self.cfg.min_password_len
            )));
        }

        if let Some(existing) = bounded(self.cfg.store_timeout, self.repo.find_by_username(username)).await? {
            debug!("username exists: {}", existing.profile.username);
            return Err(AuthError::Conflict("username already exists".into()));
        }
        if bounded(self.cfg.store_timeout, self.repo.find_by_email(email)).await?.is_some() {
            return Err(AuthError::Conflict("email already exists".into()));
        }

        let hash = hash_password(&input.password)?;
        let record = bounded(self.cfg.store_timeout, self.repo.create(username, email, hash)).await?;
        info!(admin_id = %record.profile.id, username = %record.profile.username, "admin_registered");
        Ok(record.profile)
    }

    /// Authenticate an admin and issue a fresh token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::with_secret("secret"));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.admin.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let found = bounded(self.cfg.store_timeout, self.repo.find_by_username(input.username.trim())).await?;
        let Some(record): Option<AdminRecord> = found else {
            burn_dummy_verify(&input.password);
            return Err(AuthError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(&record.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!(admin_id = %record.profile.id, "login_rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(record.profile.id)?;
        info!(admin_id = %record.profile.id, "admin_logged_in");
        Ok(AuthSession { admin: record.profile, token })
    }

    /// Sign a token for `admin_id` valid for the configured TTL.
    pub fn issue_token(&self, admin_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry. Every failure is `Unauthenticated`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(err = %e, "token_rejected");
                AuthError::Unauthenticated
            })
    }

    /// Resolve a bearer token to the admin it names.
    pub async fn authenticate(&self, token: &str) -> Result<AdminProfile, AuthError> {
        let claims = self.verify_token(token)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::Unauthenticated)?;
        self.profile(id).await
    }

    pub async fn profile(&self, id: Uuid) -> Result<AdminProfile, AuthError> {
        bounded(self.cfg.store_timeout, self.repo.find_by_id(id))
            .await?
            .map(|r| r.profile)
            .ok_or(AuthError::Unauthenticated)
    }
}

fn burn_dummy_verify(password: &str) {
    if let Some(parsed) = DUMMY_HASH.as_deref().and_then(|h| PasswordHash::new(h).ok()) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}
