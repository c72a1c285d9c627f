use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use configs::NotifierConfig;
use models::contact_message;

use super::{Notifier, NotifyError};
use crate::booking::Booking;

#[derive(Serialize)]
struct Party<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MailRequest<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    subject: String,
    text_content: String,
}

/// Posts JSON messages to a transactional-mail HTTP endpoint.
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
    admin_email: Option<String>,
}

impl HttpNotifier {
    pub fn new(cfg: &NotifierConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            sender_email: cfg.sender_email.clone(),
            sender_name: cfg.sender_name.clone(),
            admin_email: cfg.admin_email.clone(),
        })
    }

    async fn post(&self, to: Party<'_>, subject: String, text_content: String) -> Result<(), NotifyError> {
        let body = MailRequest {
            sender: Party { email: &self.sender_email, name: Some(&self.sender_name) },
            to: vec![to],
            subject,
            text_content,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        debug!(status = status.as_u16(), "mail endpoint accepted message");
        Ok(())
    }
}

pub(crate) fn booking_confirmation_text(b: &Booking) -> String {
    let mut text = format!(
        "Hello {},\n\nYour consultation is booked for {} at {}.\nStatus: {}\n",
        b.name,
        b.date.format("%A, %B %d, %Y"),
        b.time_slot,
        b.status,
    );
    if let Some(company) = &b.company {
        text.push_str(&format!("Company: {company}\n"));
    }
    text.push_str("\nWe look forward to speaking with you.\n");
    text
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_booking_confirmation(&self, booking: &Booking) -> Result<(), NotifyError> {
        self.post(
            Party { email: &booking.email, name: Some(&booking.name) },
            "Booking Confirmation".into(),
            booking_confirmation_text(booking),
        )
        .await
    }

    async fn send_contact_notification(&self, contact: &contact_message::Model) -> Result<(), NotifyError> {
        // no admin inbox configured: fall back to the sender address
        let to = self.admin_email.as_deref().unwrap_or(&self.sender_email);
        let subject = format!("New contact message: {}", contact.subject.as_deref().unwrap_or("(no subject)"));
        let text = format!("From: {} <{}>\n\n{}\n", contact.name, contact.email, contact.message);
        self.post(Party { email: to, name: None }, subject, text).await
    }
}
