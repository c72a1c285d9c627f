use serde::{Deserialize, Serialize};

use models::validate::{parse_hhmm, validate_email};

use crate::errors::ServiceError;

pub const MAX_MEETING_MINUTES: i32 = 480;

/// Business view of the settings row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub working_hours_start: String,
    pub working_hours_end: String,
    /// Weekday numbers, 0 = Sunday; sorted and unique.
    pub working_days: Vec<u8>,
    pub meeting_duration: i32,
    pub timezone: String,
    /// Stored for the dashboard; admission does not enforce it.
    pub max_bookings_per_day: i32,
    pub email_notifications: bool,
    pub company_email: String,
    pub company_phone: String,
}

impl Default for Settings {
    fn default() -> Self {
        let d = models::settings::defaults();
        Self {
            working_hours_start: d.working_hours_start,
            working_hours_end: d.working_hours_end,
            working_days: vec![1, 2, 3, 4, 5],
            meeting_duration: d.meeting_duration,
            timezone: d.timezone,
            max_bookings_per_day: d.max_bookings_per_day,
            email_notifications: d.email_notifications,
            company_email: d.company_email,
            company_phone: d.company_phone,
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    pub working_days: Option<Vec<i64>>,
    pub meeting_duration: Option<i32>,
    pub timezone: Option<String>,
    pub max_bookings_per_day: Option<i32>,
    pub email_notifications: Option<bool>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
}

impl Settings {
    /// Merge `upd` over `self`, returning the validated result.
    pub fn apply(&self, upd: SettingsUpdate) -> Result<Settings, ServiceError> {
        let mut next = self.clone();
        if let Some(v) = upd.working_hours_start { next.working_hours_start = v; }
        if let Some(v) = upd.working_hours_end { next.working_hours_end = v; }
        if let Some(days) = upd.working_days {
            let mut parsed = days
                .into_iter()
                .map(|d| match u8::try_from(d) {
                    Ok(d) if d <= 6 => Ok(d),
                    _ => Err(ServiceError::Validation(format!("working day {d} out of range 0..=6"))),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            parsed.sort_unstable();
            parsed.dedup();
            next.working_days = parsed;
        }
        if let Some(v) = upd.meeting_duration { next.meeting_duration = v; }
        if let Some(v) = upd.timezone { next.timezone = v; }
        if let Some(v) = upd.max_bookings_per_day { next.max_bookings_per_day = v; }
        if let Some(v) = upd.email_notifications { next.email_notifications = v; }
        if let Some(v) = upd.company_email { next.company_email = v; }
        if let Some(v) = upd.company_phone { next.company_phone = v; }
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        let start = parse_hhmm(&self.working_hours_start)?;
        let end = parse_hhmm(&self.working_hours_end)?;
        if start >= end {
            return Err(ServiceError::Validation("working_hours_start must be before working_hours_end".into()));
        }
        if !(1..=MAX_MEETING_MINUTES).contains(&self.meeting_duration) {
            return Err(ServiceError::Validation(format!("meeting_duration must be within 1..={MAX_MEETING_MINUTES}")));
        }
        if self.working_days.iter().any(|d| *d > 6) {
            return Err(ServiceError::Validation("working days must be within 0..=6".into()));
        }
        if self.max_bookings_per_day < 0 {
            return Err(ServiceError::Validation("max_bookings_per_day must be >= 0".into()));
        }
        if self.timezone.trim().is_empty() {
            return Err(ServiceError::Validation("timezone is required".into()));
        }
        if !self.company_email.is_empty() {
            validate_email(&self.company_email)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let s = Settings::default();
        let next = s.apply(SettingsUpdate { meeting_duration: Some(45), ..Default::default() }).unwrap();
        assert_eq!(next.meeting_duration, 45);
        assert_eq!(next.working_hours_start, s.working_hours_start);
        assert_eq!(next.working_days, s.working_days);
    }

    #[test]
    fn apply_normalizes_days() {
        let next = Settings::default()
            .apply(SettingsUpdate { working_days: Some(vec![5, 0, 5, 3]), ..Default::default() })
            .unwrap();
        assert_eq!(next.working_days, vec![0, 3, 5]);
    }

    #[test]
    fn apply_rejects_bad_values() {
        let s = Settings::default();
        let cases = [
            SettingsUpdate { working_days: Some(vec![7]), ..Default::default() },
            SettingsUpdate { working_days: Some(vec![-1]), ..Default::default() },
            SettingsUpdate { working_hours_start: Some("18:00".into()), ..Default::default() },
            SettingsUpdate { working_hours_end: Some("9".into()), ..Default::default() },
            SettingsUpdate { meeting_duration: Some(0), ..Default::default() },
            SettingsUpdate { meeting_duration: Some(481), ..Default::default() },
            SettingsUpdate { max_bookings_per_day: Some(-1), ..Default::default() },
            SettingsUpdate { company_email: Some("nope".into()), ..Default::default() },
        ];
        for upd in cases {
            let dbg = format!("{upd:?}");
            assert!(matches!(s.apply(upd), Err(ServiceError::Validation(_))), "{dbg} should fail");
        }
    }
}
