use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::domain::{Booking, BookingFilter, BookingStatus, ValidBooking};
use crate::errors::ServiceError;

/// Persistence for bookings. `insert` must be atomic with respect to the
/// one-live-booking-per-slot rule.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_active_by_date_and_slot(&self, date: NaiveDate, time_slot: &str) -> Result<Option<Booking>, ServiceError>;
    async fn list_active_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ServiceError>;
    /// Insert as `pending`; a live booking on the same slot yields `SlotConflict`.
    async fn insert(&self, booking: &ValidBooking) -> Result<Booking, ServiceError>;
    /// Set `status` only if the row still has `expected`. `None` when no row matched.
    async fn update_status(&self, id: Uuid, expected: BookingStatus, status: BookingStatus) -> Result<Option<Booking>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// Page of bookings (date desc, time_slot desc) and the total matching count.
    async fn list(&self, filter: &BookingFilter, page_idx: u64, per_page: u64) -> Result<(Vec<Booking>, u64), ServiceError>;
}

pub(crate) fn slot_conflict(date: NaiveDate, time_slot: &str) -> ServiceError {
    ServiceError::SlotConflict { date: date.to_string(), time_slot: time_slot.to_string() }
}

/// In-memory repository for tests; the mutex makes check-and-insert atomic.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::Utc;

    #[derive(Default)]
    pub struct MockBookingRepository {
        rows: Mutex<HashMap<Uuid, Booking>>,
        delay: Option<Duration>,
    }

    impl MockBookingRepository {
        /// Every call sleeps for `delay` first, to exercise store deadlines.
        pub fn slow(delay: Duration) -> Self {
            Self { delay: Some(delay), ..Self::default() }
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        async fn pause(&self) {
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn find_active_by_date_and_slot(&self, date: NaiveDate, time_slot: &str) -> Result<Option<Booking>, ServiceError> {
            self.pause().await;
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .find(|b| b.date == date && b.time_slot == time_slot && b.status.occupies_slot())
                .cloned())
        }

        async fn list_active_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, ServiceError> {
            self.pause().await;
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().filter(|b| b.date == date && b.status.occupies_slot()).cloned().collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ServiceError> {
            self.pause().await;
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, v: &ValidBooking) -> Result<Booking, ServiceError> {
            self.pause().await;
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|b| b.date == v.date && b.time_slot == v.time_slot && b.status.occupies_slot()) {
                return Err(slot_conflict(v.date, &v.time_slot));
            }
            let now = Utc::now();
            let b = Booking {
                id: Uuid::new_v4(),
                name: v.name.clone(),
                email: v.email.clone(),
                company: v.company.clone(),
                notes: v.notes.clone(),
                date: v.date,
                time_slot: v.time_slot.clone(),
                status: BookingStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            rows.insert(b.id, b.clone());
            Ok(b)
        }

        async fn update_status(&self, id: Uuid, expected: BookingStatus, status: BookingStatus) -> Result<Option<Booking>, ServiceError> {
            self.pause().await;
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&id) {
                Some(b) if b.status == expected => {
                    b.status = status;
                    b.updated_at = Utc::now();
                    Ok(Some(b.clone()))
                }
                _ => Ok(None),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.pause().await;
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn list(&self, filter: &BookingFilter, page_idx: u64, per_page: u64) -> Result<(Vec<Booking>, u64), ServiceError> {
            self.pause().await;
            let rows = self.rows.lock().unwrap();
            let mut hits: Vec<Booking> = rows.values().filter(|b| filter.matches(b)).cloned().collect();
            hits.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time_slot.cmp(&a.time_slot)));
            let total = hits.len() as u64;
            let page = hits
                .into_iter()
                .skip((page_idx * per_page) as usize)
                .take(per_page as usize)
                .collect();
            Ok((page, total))
        }
    }
}
