use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::domain::{Settings, SettingsUpdate};
use super::repository::SettingsRepository;
use crate::errors::{bounded, ServiceError};

pub struct SettingsService<S: SettingsRepository + ?Sized> {
    repo: Arc<S>,
    timeout: Duration,
}

impl<S: SettingsRepository + ?Sized> SettingsService<S> {
    pub fn new(repo: Arc<S>, timeout: Duration) -> Self { Self { repo, timeout } }

    pub async fn get(&self) -> Result<Settings, ServiceError> {
        bounded(self.timeout, self.repo.get()).await
    }

    /// Apply a partial update. Nothing is written unless the merged settings validate.
    #[instrument(skip(self, upd))]
    pub async fn update(&self, upd: SettingsUpdate) -> Result<Settings, ServiceError> {
        let saved = bounded(self.timeout, self.repo.update(upd)).await?;
        info!(
            start = %saved.working_hours_start,
            end = %saved.working_hours_end,
            duration = saved.meeting_duration,
            "settings_updated"
        );
        Ok(saved)
    }
}
