//! Slot allocation.
//!
//! A working day is cut into back-to-back slots of `duration` minutes starting
//! at `start`. A slot is offered only if it ends no later than `end`, so a
//! trailing partial slot is dropped. Everything here is pure.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use models::validate::parse_hhmm;

use crate::errors::ServiceError;
use crate::settings::Settings;

/// Working-hours window derived from settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: u32,
    /// 0 = Sunday
    pub working_days: Vec<u8>,
}

impl Schedule {
    pub fn from_settings(s: &Settings) -> Result<Self, ServiceError> {
        let start = parse_hhmm(&s.working_hours_start)?;
        let end = parse_hhmm(&s.working_hours_end)?;
        Ok(Self {
            start,
            end,
            duration_minutes: u32::try_from(s.meeting_duration).unwrap_or(0),
            working_days: s.working_days.clone(),
        })
    }

    pub fn works_on(&self, date: NaiveDate) -> bool {
        let day = date.weekday().num_days_from_sunday() as u8;
        self.working_days.contains(&day)
    }

    /// Every slot label of a working day, ascending.
    pub fn candidate_slots(&self) -> Vec<String> {
        let start = minutes_of(self.start);
        let end = minutes_of(self.end);
        let step = self.duration_minutes;
        if step == 0 || start >= end {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(((end - start) / step) as usize);
        let mut t = start;
        while t + step <= end {
            out.push(label(t));
            t += step;
        }
        out
    }

    /// Candidate slots for `date`; empty on a non-working day.
    pub fn slots_for(&self, date: NaiveDate) -> Vec<String> {
        if !self.works_on(date) {
            return Vec::new();
        }
        self.candidate_slots()
    }

    pub fn offers(&self, date: NaiveDate, time_slot: &str) -> bool {
        self.slots_for(date).iter().any(|s| s == time_slot)
    }
}

/// Candidate slots for `date` minus those already taken. `taken` must only
/// hold slots of non-cancelled bookings on that date.
pub fn available_slots<'a, I>(schedule: &Schedule, date: NaiveDate, taken: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();
    schedule
        .slots_for(date)
        .into_iter()
        .filter(|s| !taken.contains(s.as_str()))
        .collect()
}

fn minutes_of(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(start: &str, end: &str, duration: u32) -> Schedule {
        Schedule {
            start: parse_hhmm(start).unwrap(),
            end: parse_hhmm(end).unwrap(),
            duration_minutes: duration,
            working_days: (0..=6).collect(),
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn one_hour_in_half_hour_steps() {
        assert_eq!(schedule("09:00", "10:00", 30).candidate_slots(), vec!["09:00", "09:30"]);
    }

    #[test]
    fn booked_slot_is_excluded() {
        let s = schedule("09:00", "10:00", 30);
        assert_eq!(available_slots(&s, june_first(), ["09:00"]), vec!["09:30"]);
    }

    #[test]
    fn partial_last_slot_is_dropped() {
        assert_eq!(schedule("09:00", "10:00", 40).candidate_slots(), vec!["09:00"]);
        assert_eq!(schedule("09:00", "09:20", 30).candidate_slots(), Vec::<String>::new());
    }

    #[test]
    fn inverted_or_empty_window_yields_nothing() {
        assert!(schedule("10:00", "09:00", 30).candidate_slots().is_empty());
        assert!(schedule("10:00", "10:00", 30).candidate_slots().is_empty());
        assert!(schedule("09:00", "10:00", 0).candidate_slots().is_empty());
    }

    #[test]
    fn non_working_day_yields_nothing() {
        // 2025-06-01 is a Sunday
        let s = Schedule { working_days: vec![1, 2, 3, 4, 5], ..schedule("09:00", "17:00", 30) };
        assert!(s.slots_for(june_first()).is_empty());
        assert!(!s.offers(june_first(), "09:00"));
        let monday = june_first().succ_opt().unwrap();
        assert_eq!(s.slots_for(monday).len(), 16);
    }

    #[test]
    fn labels_cross_the_hour() {
        let slots = schedule("09:45", "11:15", 45).candidate_slots();
        assert_eq!(slots, vec!["09:45", "10:30"]);
    }

    #[test]
    fn from_settings_reads_window() {
        let s = Schedule::from_settings(&Settings::default()).unwrap();
        assert_eq!(s.candidate_slots().first().map(String::as_str), Some("09:00"));
        assert_eq!(s.candidate_slots().last().map(String::as_str), Some("16:30"));
    }
}
