use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::repository::BookingRepository;
use service::booking::BookingService;
use service::errors::{bounded, ServiceError};
use service::notify::NotificationQueue;
use service::settings::repo::seaorm::SeaOrmSettingsRepository;
use service::settings::repository::SettingsRepository;
use service::settings::SettingsService;

/// Shared handler state; every store and the notifier are injected here.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub bookings: Arc<BookingService<dyn BookingRepository, dyn SettingsRepository>>,
    pub settings: Arc<SettingsService<dyn SettingsRepository>>,
    pub notifications: NotificationQueue,
    pub store_timeout: Duration,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        auth_repo: Arc<dyn AuthRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        auth_cfg: AuthConfig,
        notifications: NotificationQueue,
    ) -> Self {
        let store_timeout = auth_cfg.store_timeout;
        Self {
            db,
            auth: Arc::new(AuthService::new(auth_repo, auth_cfg)),
            bookings: Arc::new(BookingService::new(
                booking_repo,
                settings_repo.clone(),
                notifications.clone(),
                store_timeout,
            )),
            settings: Arc::new(SettingsService::new(settings_repo, store_timeout)),
            notifications,
            store_timeout,
        }
    }

    /// All repositories backed by `db`.
    pub fn with_database(db: DatabaseConnection, cfg: &AppConfig, notifications: NotificationQueue) -> Self {
        Self::new(
            db.clone(),
            Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            Arc::new(SeaOrmBookingRepository { db: db.clone() }),
            Arc::new(SeaOrmSettingsRepository { db: db.clone() }),
            AuthConfig::from_app(cfg),
            notifications,
        )
    }

    /// Run a direct database call under the store deadline.
    pub async fn store<T, F>(&self, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        bounded(self.store_timeout, fut).await
    }
}
