use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use models::booking;

use crate::booking::repo::seaorm::to_domain;
use crate::booking::{Booking, BookingStatus};
use crate::db::{contact_service, newsletter_service};
use crate::errors::ServiceError;

const RECENT_BOOKINGS: u64 = 5;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_bookings: u64,
    pub today_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub completed_bookings: u64,
    pub cancelled_bookings: u64,
    pub new_contacts: u64,
    pub active_subscribers: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: DashboardCounts,
    pub recent_bookings: Vec<Booking>,
}

async fn count_status(db: &DatabaseConnection, status: BookingStatus) -> Result<u64, ServiceError> {
    Ok(booking::Entity::find()
        .filter(booking::Column::Status.eq(status.as_str()))
        .count(db)
        .await?)
}

/// Admin dashboard figures as of `today`.
pub async fn dashboard(db: &DatabaseConnection, today: NaiveDate) -> Result<DashboardStats, ServiceError> {
    let stats = DashboardCounts {
        total_bookings: booking::Entity::find().count(db).await?,
        today_bookings: booking::Entity::find().filter(booking::Column::Date.eq(today)).count(db).await?,
        pending_bookings: count_status(db, BookingStatus::Pending).await?,
        confirmed_bookings: count_status(db, BookingStatus::Confirmed).await?,
        completed_bookings: count_status(db, BookingStatus::Completed).await?,
        cancelled_bookings: count_status(db, BookingStatus::Cancelled).await?,
        new_contacts: contact_service::count_contacts_by_status(db, "new").await?,
        active_subscribers: newsletter_service::count_active_subscribers(db).await?,
    };
    let recent = booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .limit(RECENT_BOOKINGS)
        .all(db)
        .await?;
    let recent_bookings = recent.into_iter().map(to_domain).collect::<Result<_, _>>()?;
    Ok(DashboardStats { stats, recent_bookings })
}
