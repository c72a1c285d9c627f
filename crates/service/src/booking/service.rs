use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{parse_date, Booking, BookingFilter, BookingPage, BookingStatus, NewBooking};
use super::repository::{slot_conflict, BookingRepository};
use super::slots::{available_slots, Schedule};
use crate::errors::{bounded, ServiceError};
use crate::notify::{Notification, NotificationQueue};
use crate::pagination::Pagination;
use crate::settings::repository::SettingsRepository;

/// Booking workflows: slot lookup, admission, admin transitions.
pub struct BookingService<B: BookingRepository + ?Sized, S: SettingsRepository + ?Sized> {
    bookings: Arc<B>,
    settings: Arc<S>,
    notifications: NotificationQueue,
    timeout: Duration,
}

impl<B: BookingRepository + ?Sized, S: SettingsRepository + ?Sized> BookingService<B, S> {
    pub fn new(bookings: Arc<B>, settings: Arc<S>, notifications: NotificationQueue, timeout: Duration) -> Self {
        Self { bookings, settings, notifications, timeout }
    }

    async fn schedule(&self) -> Result<(Schedule, bool), ServiceError> {
        let settings = bounded(self.timeout, self.settings.get()).await?;
        Ok((Schedule::from_settings(&settings)?, settings.email_notifications))
    }

    /// Open slots for a `YYYY-MM-DD` date, ascending.
    #[instrument(skip(self))]
    pub async fn available_slots(&self, date: &str) -> Result<Vec<String>, ServiceError> {
        let date = parse_date(date)?;
        self.available_on(date).await
    }

    pub async fn available_on(&self, date: NaiveDate) -> Result<Vec<String>, ServiceError> {
        let (schedule, _) = self.schedule().await?;
        if !schedule.works_on(date) {
            return Ok(Vec::new());
        }
        let taken = bounded(self.timeout, self.bookings.list_active_by_date(date)).await?;
        Ok(available_slots(&schedule, date, taken.iter().map(|b| b.time_slot.as_str())))
    }

    /// Reserve a slot as a `pending` booking, then queue its confirmation.
    #[instrument(skip(self, req), fields(date = %req.date, time_slot = %req.time_slot))]
    pub async fn admit(&self, req: NewBooking) -> Result<Booking, ServiceError> {
        let req = req.validate()?;
        let (schedule, notify) = self.schedule().await?;
        if !schedule.offers(req.date, &req.time_slot) {
            return Err(ServiceError::Validation(format!(
                "{} is not a bookable slot on {}",
                req.time_slot, req.date
            )));
        }
        if bounded(self.timeout, self.bookings.find_active_by_date_and_slot(req.date, &req.time_slot))
            .await?
            .is_some()
        {
            return Err(slot_conflict(req.date, &req.time_slot));
        }
        // insert is the authority; the lookup above only short-circuits the common case
        let booking = bounded(self.timeout, self.bookings.insert(&req)).await?;
        info!(booking_id = %booking.id, date = %booking.date, time_slot = %booking.time_slot, "booking_admitted");

        if notify && !self.notifications.submit(Notification::BookingConfirmation(booking.clone())) {
            warn!(booking_id = %booking.id, "booking_confirmation_not_queued");
        }
        Ok(booking)
    }

    pub async fn get(&self, id: Uuid) -> Result<Booking, ServiceError> {
        bounded(self.timeout, self.bookings.find_by_id(id))
            .await?
            .ok_or_else(|| ServiceError::not_found("booking"))
    }

    /// Move a booking to `status` if the lifecycle allows it.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: Uuid, status: BookingStatus) -> Result<Booking, ServiceError> {
        let current = self.get(id).await?;
        if !current.status.can_transition_to(status) {
            return Err(ServiceError::InvalidTransition { from: current.status, to: status });
        }
        match bounded(self.timeout, self.bookings.update_status(id, current.status, status)).await? {
            Some(updated) => {
                info!(booking_id = %id, from = %current.status, to = %status, "booking_status_changed");
                Ok(updated)
            }
            // lost a race with another update or a delete
            None => {
                let now = self.get(id).await?;
                Err(ServiceError::InvalidTransition { from: now.status, to: status })
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !bounded(self.timeout, self.bookings.delete(id)).await? {
            return Err(ServiceError::not_found("booking"));
        }
        info!(booking_id = %id, "booking_deleted");
        Ok(())
    }

    pub async fn list(&self, filter: BookingFilter, page: Pagination) -> Result<BookingPage, ServiceError> {
        let (idx, per_page) = page.normalize();
        let (bookings, total) = bounded(self.timeout, self.bookings.list(&filter, idx, per_page)).await?;
        Ok(BookingPage { bookings, pagination: page.meta(total) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::repository::mock::MockBookingRepository;
    use crate::notify::mock::{FailingNotifier, RecordingNotifier};
    use crate::settings::repository::mock::MockSettingsRepository;
    use crate::settings::Settings;

    type Svc = BookingService<MockBookingRepository, MockSettingsRepository>;

    fn every_day(start: &str, end: &str, duration: i32) -> Settings {
        Settings {
            working_hours_start: start.into(),
            working_hours_end: end.into(),
            meeting_duration: duration,
            working_days: (0..=6).collect(),
            ..Settings::default()
        }
    }

    fn service_with(settings: Settings, repo: MockBookingRepository) -> (Arc<MockBookingRepository>, Arc<RecordingNotifier>, Svc) {
        let rec = Arc::new(RecordingNotifier::default());
        let (queue, _worker) = NotificationQueue::start(rec.clone(), 16);
        let repo = Arc::new(repo);
        let svc = BookingService::new(repo.clone(), Arc::new(MockSettingsRepository::with(settings)), queue, Duration::from_millis(500));
        (repo, rec, svc)
    }

    fn service() -> (Arc<MockBookingRepository>, Arc<RecordingNotifier>, Svc) {
        service_with(every_day("09:00", "10:00", 30), MockBookingRepository::default())
    }

    fn request(slot: &str) -> NewBooking {
        NewBooking {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            date: "2025-06-01".into(),
            time_slot: slot.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn booked_slot_disappears_and_cancel_releases_it() {
        let (_, _, svc) = service();
        assert_eq!(svc.available_slots("2025-06-01").await.unwrap(), vec!["09:00", "09:30"]);

        let b = svc.admit(request("09:00")).await.unwrap();
        assert_eq!(b.status, BookingStatus::Pending);
        svc.transition(b.id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(svc.available_slots("2025-06-01").await.unwrap(), vec!["09:30"]);

        svc.transition(b.id, BookingStatus::Cancelled).await.unwrap();
        assert_eq!(svc.available_slots("2025-06-01").await.unwrap(), vec!["09:00", "09:30"]);
        svc.admit(request("09:00")).await.unwrap();
    }

    #[tokio::test]
    async fn taken_slot_conflicts_without_new_row() {
        let (repo, _, svc) = service();
        svc.admit(request("09:30")).await.unwrap();
        let err = svc.admit(NewBooking { name: "Other".into(), ..request("09:30") }).await.unwrap_err();
        assert!(matches!(err, ServiceError::SlotConflict { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_admissions_for_one_slot_admit_exactly_one() {
        let (repo, _, svc) = service();
        let svc = Arc::new(svc);
        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.admit(NewBooking { name: format!("Guest {i}"), ..request("09:00") }).await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(ServiceError::SlotConflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((ok, conflicts), (1, 7));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn slot_outside_schedule_is_a_validation_error() {
        let (repo, _, svc) = service();
        for slot in ["10:00", "09:15", "08:30"] {
            assert!(matches!(svc.admit(request(slot)).await, Err(ServiceError::Validation(_))));
        }
        let weekdays_only = Settings { working_days: vec![1, 2, 3, 4, 5], ..every_day("09:00", "10:00", 30) };
        let (_, _, weekday_svc) = service_with(weekdays_only, MockBookingRepository::default());
        // 2025-06-01 is a Sunday
        assert!(weekday_svc.available_slots("2025-06-01").await.unwrap().is_empty());
        assert!(matches!(weekday_svc.admit(request("09:00")).await, Err(ServiceError::Validation(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn terminal_states_reject_transitions() {
        let (_, _, svc) = service();
        let b = svc.admit(request("09:00")).await.unwrap();
        let err = svc.transition(b.id, BookingStatus::Completed).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition { from: BookingStatus::Pending, to: BookingStatus::Completed }));

        svc.transition(b.id, BookingStatus::Confirmed).await.unwrap();
        svc.transition(b.id, BookingStatus::Completed).await.unwrap();
        for next in BookingStatus::ALL {
            assert!(matches!(svc.transition(b.id, next).await, Err(ServiceError::InvalidTransition { .. })));
        }
        assert!(matches!(svc.transition(Uuid::new_v4(), BookingStatus::Confirmed).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn admission_queues_confirmation() {
        let (_, rec, svc) = service();
        svc.admit(request("09:30")).await.unwrap();
        for _ in 0..50 {
            if !rec.sent().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(rec.sent(), vec!["booking:jane@example.com:09:30"]);
    }

    #[tokio::test]
    async fn notifier_failure_keeps_reservation() {
        let (queue, _worker) = NotificationQueue::start(Arc::new(FailingNotifier), 4);
        let repo = Arc::new(MockBookingRepository::default());
        let svc = BookingService::new(
            repo.clone(),
            Arc::new(MockSettingsRepository::with(every_day("09:00", "10:00", 30))),
            queue,
            Duration::from_millis(500),
        );
        let b = svc.admit(request("09:00")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(svc.get(b.id).await.unwrap().status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn slow_store_surfaces_unavailable() {
        let (_, _, svc) = service_with(every_day("09:00", "10:00", 30), MockBookingRepository::slow(Duration::from_secs(2)));
        let err = svc.admit(request("09:00")).await.unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_paginates() {
        let (_, _, svc) = service();
        svc.admit(request("09:00")).await.unwrap();
        svc.admit(request("09:30")).await.unwrap();
        svc.admit(NewBooking { date: "2025-06-02".into(), ..request("09:00") }).await.unwrap();

        let page = svc.list(BookingFilter::default(), Pagination::new(Some(1), Some(2))).await.unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        let order: Vec<(String, String)> = page.bookings.iter().map(|b| (b.date.to_string(), b.time_slot.clone())).collect();
        assert_eq!(order, vec![("2025-06-02".into(), "09:00".into()), ("2025-06-01".into(), "09:30".into())]);

        let filtered = svc
            .list(BookingFilter { end_date: NaiveDate::from_ymd_opt(2025, 6, 1), ..Default::default() }, Pagination::default())
            .await
            .unwrap();
        assert_eq!(filtered.bookings.len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_booking_is_not_found() {
        let (_, _, svc) = service();
        let b = svc.admit(request("09:00")).await.unwrap();
        svc.delete(b.id).await.unwrap();
        assert!(matches!(svc.delete(b.id).await, Err(ServiceError::NotFound(_))));
    }
}
