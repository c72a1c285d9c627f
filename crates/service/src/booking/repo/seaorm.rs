use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use models::booking;
use models::errors::ModelError;

use crate::booking::domain::{Booking, BookingFilter, BookingStatus, ValidBooking};
use crate::booking::repository::{slot_conflict, BookingRepository};
use crate::errors::ServiceError;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

pub fn to_domain(m: booking::Model) -> Result<Booking, ServiceError> {
    Ok(Booking {
        status: m.status.parse()?,
        id: m.id,
        name: m.name,
        email: m.email,
        company: m.company,
        notes: m.notes,
        date: m.date,
        time_slot: m.time_slot,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

fn to_domain_all(rows: Vec<booking::Model>) -> Result<Vec<Booking>, ServiceError> {
    rows.into_iter().map(to_domain).collect()
}

fn active_on(date: NaiveDate) -> Condition {
    Condition::all()
        .add(booking::Column::Date.eq(date))
        .add(booking::Column::Status.ne(booking::STATUS_CANCELLED))
}

fn filter_condition(filter: &BookingFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(s) = filter.status {
        cond = cond.add(booking::Column::Status.eq(s.as_str()));
    }
    if let Some(d) = filter.start_date {
        cond = cond.add(booking::Column::Date.gte(d));
    }
    if let Some(d) = filter.end_date {
        cond = cond.add(booking::Column::Date.lte(d));
    }
    cond
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_active_by_date_and_slot(&self, date: NaiveDate, time_slot: &str) -> Result<Option<Booking>, ServiceError> {
        let row = booking::Entity::find()
            .filter(active_on(date))
            .filter(booking::Column::TimeSlot.eq(time_slot))
            .one(&self.db)
            .await?;
        row.map(to_domain).transpose()
    }

    async fn list_active_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, ServiceError> {
        let rows = booking::Entity::find()
            .filter(active_on(date))
            .order_by_asc(booking::Column::TimeSlot)
            .all(&self.db)
            .await?;
        to_domain_all(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ServiceError> {
        booking::Entity::find_by_id(id).one(&self.db).await?.map(to_domain).transpose()
    }

    async fn insert(&self, v: &ValidBooking) -> Result<Booking, ServiceError> {
        let created = booking::create(
            &self.db,
            &v.name,
            &v.email,
            v.company.as_deref(),
            v.notes.as_deref(),
            v.date,
            &v.time_slot,
        )
        .await
        .map_err(|e| match e {
            ModelError::Conflict(_) => slot_conflict(v.date, &v.time_slot),
            other => other.into(),
        })?;
        to_domain(created)
    }

    async fn update_status(&self, id: Uuid, expected: BookingStatus, status: BookingStatus) -> Result<Option<Booking>, ServiceError> {
        let res = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(status.as_str()))
            .col_expr(booking::Column::UpdatedAt, Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(Utc::now())))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = booking::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, filter: &BookingFilter, page_idx: u64, per_page: u64) -> Result<(Vec<Booking>, u64), ServiceError> {
        let paginator = booking::Entity::find()
            .filter(filter_condition(filter))
            .order_by_desc(booking::Column::Date)
            .order_by_desc(booking::Column::TimeSlot)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page_idx).await?;
        Ok((to_domain_all(rows)?, total))
    }
}
