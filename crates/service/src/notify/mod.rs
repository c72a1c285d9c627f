//! Outbound notifications (booking confirmations, contact alerts).
//!
//! Callers hand a [`Notification`] to a [`NotificationQueue`] and move on; a
//! background worker delivers it through a [`Notifier`] and logs the outcome.

pub mod queue;
pub mod log_notifier;
pub mod http_notifier;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use configs::NotifierConfig;
use models::contact_message;

use crate::booking::Booking;

pub use http_notifier::HttpNotifier;
pub use log_notifier::LogNotifier;
pub use queue::NotificationQueue;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport failed: {0}")]
    Transport(String),
    #[error("notification rejected with status {0}")]
    Rejected(u16),
}

#[derive(Debug, Clone)]
pub enum Notification {
    BookingConfirmation(Booking),
    ContactReceived(contact_message::Model),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::BookingConfirmation(_) => "booking_confirmation",
            Notification::ContactReceived(_) => "contact_received",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_booking_confirmation(&self, booking: &Booking) -> Result<(), NotifyError>;
    async fn send_contact_notification(&self, contact: &contact_message::Model) -> Result<(), NotifyError>;

    async fn deliver(&self, n: &Notification) -> Result<(), NotifyError> {
        match n {
            Notification::BookingConfirmation(b) => self.send_booking_confirmation(b).await,
            Notification::ContactReceived(c) => self.send_contact_notification(c).await,
        }
    }
}

/// Pick the notifier named by configuration.
pub fn from_config(cfg: &NotifierConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    if cfg.enabled {
        Ok(Arc::new(HttpNotifier::new(cfg)?))
    } else {
        Ok(Arc::new(LogNotifier))
    }
}

/// Test notifiers
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records one line per delivered notification.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_booking_confirmation(&self, booking: &Booking) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(format!("booking:{}:{}", booking.email, booking.time_slot));
            Ok(())
        }

        async fn send_contact_notification(&self, contact: &contact_message::Model) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(format!("contact:{}", contact.email));
            Ok(())
        }
    }

    /// Fails every delivery.
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_booking_confirmation(&self, _booking: &Booking) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("smtp relay down".into()))
        }

        async fn send_contact_notification(&self, _contact: &contact_message::Model) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected(503))
        }
    }
}
