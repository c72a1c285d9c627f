use async_trait::async_trait;
use tracing::info;

use models::contact_message;

use super::{Notifier, NotifyError};
use crate::booking::Booking;

/// Writes notifications to the log instead of sending mail.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_booking_confirmation(&self, booking: &Booking) -> Result<(), NotifyError> {
        info!(to = %booking.email, date = %booking.date, time_slot = %booking.time_slot, "booking_confirmation_logged");
        Ok(())
    }

    async fn send_contact_notification(&self, contact: &contact_message::Model) -> Result<(), NotifyError> {
        info!(from = %contact.email, subject = ?contact.subject, "contact_notification_logged");
        Ok(())
    }
}
