use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::types::PageMeta;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [Self::Pending, Self::Confirmed, Self::Completed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// pending -> confirmed | cancelled, confirmed -> completed | cancelled.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!((self, next), (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled))
    }

    /// Whether a booking in this status holds its (date, time_slot).
    pub fn occupies_slot(self) -> bool {
        self != Self::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ServiceError::Validation(format!("unknown booking status '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public booking request as received; validated by admission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "timeSlot", alias = "time_slot")]
    pub time_slot: String,
}

/// A request that passed field validation.
#[derive(Debug, Clone)]
pub struct ValidBooking {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_slot: String,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation(format!("'{raw}' is not a YYYY-MM-DD date")))
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl NewBooking {
    pub fn validate(self) -> Result<ValidBooking, ServiceError> {
        use models::validate::{parse_hhmm, validate_email, validate_max_len, validate_required};

        let name = self.name.trim().to_string();
        validate_required("name", &name)?;
        validate_max_len("name", &name, 255)?;
        let email = self.email.trim().to_string();
        validate_email(&email)?;
        let company = non_blank(self.company);
        if let Some(c) = &company {
            validate_max_len("company", c, 255)?;
        }
        let date = parse_date(&self.date)?;
        parse_hhmm(&self.time_slot)?;
        Ok(ValidBooking { name, email, company, notes: non_blank(self.notes), date, time_slot: self.time_slot })
    }
}

/// Admin listing filter
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn matches(&self, b: &Booking) -> bool {
        self.status.map_or(true, |s| b.status == s)
            && self.start_date.map_or(true, |d| b.date >= d)
            && self.end_date.map_or(true, |d| b.date <= d)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_lifecycle() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Pending));
        for next in BookingStatus::ALL {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert!("Confirmed".parse::<BookingStatus>().is_err());
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn request_accepts_camel_case_time_slot() {
        let req: NewBooking = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@example.com","date":"2025-06-01","timeSlot":"09:00"}"#,
        )
        .unwrap();
        assert_eq!(req.time_slot, "09:00");
        let v = req.validate().unwrap();
        assert_eq!(v.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(v.company.is_none());
    }

    #[test]
    fn validation_rejects_each_bad_field() {
        let good = NewBooking {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            date: "2025-06-01".into(),
            time_slot: "09:00".into(),
            ..Default::default()
        };
        assert!(good.clone().validate().is_ok());
        for bad in [
            NewBooking { name: " ".into(), ..good.clone() },
            NewBooking { email: "jane".into(), ..good.clone() },
            NewBooking { date: "06/01/2025".into(), ..good.clone() },
            NewBooking { date: "2025-02-30".into(), ..good.clone() },
            NewBooking { time_slot: "9:00".into(), ..good.clone() },
        ] {
            assert!(matches!(bad.validate(), Err(ServiceError::Validation(_))));
        }
    }
}
