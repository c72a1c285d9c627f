use async_trait::async_trait;

use super::domain::{Settings, SettingsUpdate};
use crate::errors::ServiceError;

/// Storage for the settings singleton.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self) -> Result<Settings, ServiceError>;
    /// Merge `upd` over the stored row and persist it as one atomic step, so
    /// concurrent partial updates keep each other's fields. Nothing is written
    /// when the merged settings fail validation.
    async fn update(&self, upd: SettingsUpdate) -> Result<Settings, ServiceError>;
}

/// In-memory settings for tests
pub mod mock {
    use super::*;
    use std::time::Duration;

    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockSettingsRepository {
        inner: Mutex<Settings>,
        delay: Option<Duration>,
    }

    impl MockSettingsRepository {
        pub fn with(settings: Settings) -> Self { Self { inner: Mutex::new(settings), delay: None } }

        /// Sleeps between reading and writing during `update`.
        pub fn with_delay(settings: Settings, delay: Duration) -> Self {
            Self { inner: Mutex::new(settings), delay: Some(delay) }
        }
    }

    #[async_trait]
    impl SettingsRepository for MockSettingsRepository {
        async fn get(&self) -> Result<Settings, ServiceError> {
            Ok(self.inner.lock().await.clone())
        }

        async fn update(&self, upd: SettingsUpdate) -> Result<Settings, ServiceError> {
            let mut guard = self.inner.lock().await;
            let next = guard.apply(upd)?;
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            *guard = next.clone();
            Ok(next)
        }
    }
}
