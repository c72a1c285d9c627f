//! Booking administration and the dashboard.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::booking::domain::{parse_date, BookingFilter, BookingPage};
use service::booking::BookingStatus;
use service::db::stats_service::{self, DashboardStats};
use service::errors::ServiceError;
use service::pagination::Pagination;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl BookingListQuery {
    fn into_filter(self) -> Result<(BookingFilter, Pagination), ServiceError> {
        let given = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let filter = BookingFilter {
            status: given(self.status).map(|s| s.parse()).transpose()?,
            start_date: given(self.start_date).map(|d| parse_date(&d)).transpose()?,
            end_date: given(self.end_date).map(|d| parse_date(&d)).transpose()?,
        };
        Ok((filter, Pagination::new(self.page, self.limit)))
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[utoipa::path(
    get, path = "/api/admin/stats", tag = "admin", security(("bearer" = [])),
    responses((status = 200, description = "Dashboard figures"), (status = 401, description = "Unauthorized"))
)]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<DashboardStats>, JsonApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.store(stats_service::dashboard(&state.db, today)).await?))
}

#[utoipa::path(
    get, path = "/api/admin/bookings", tag = "admin", security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "pending|confirmed|completed|cancelled"),
        ("startDate" = Option<String>, Query, description = "inclusive YYYY-MM-DD, also accepted as start_date"),
        ("endDate" = Option<String>, Query, description = "inclusive YYYY-MM-DD, also accepted as end_date"),
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("limit" = Option<u32>, Query, description = "page size, max 100")
    ),
    responses((status = 200, description = "Bookings, newest date first"), (status = 400, description = "Bad filter"), (status = 401, description = "Unauthorized"))
)]
pub async fn list_bookings(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<BookingListQuery>,
) -> Result<Json<BookingPage>, JsonApiError> {
    let (filter, page) = q.into_filter()?;
    Ok(Json(state.bookings.list(filter, page).await?))
}

pub async fn get_booking(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let booking = state.bookings.get(id).await?;
    Ok(Json(json!({ "booking": booking })))
}

#[utoipa::path(
    patch, path = "/api/admin/bookings/{id}", tag = "admin", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = crate::openapi::StatusRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BookingDoc),
        (status = 404, description = "Not found"),
        (status = 422, description = "Transition not allowed")
    )
)]
pub async fn update_booking_status(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<Value>, JsonApiError> {
    let next: BookingStatus = body.status.trim().parse()?;
    let booking = state.bookings.transition(id, next).await?;
    Ok(Json(json!({ "message": "Booking status updated", "booking": booking })))
}

#[utoipa::path(
    delete, path = "/api/admin/bookings/{id}", tag = "admin", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_booking(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    state.bookings.delete(id).await?;
    Ok(Json(json!({ "message": "Booking deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        let q = BookingListQuery { status: Some(" ".into()), start_date: Some(String::new()), ..Default::default() };
        let (f, p) = q.into_filter().unwrap();
        assert!(f.status.is_none() && f.start_date.is_none());
        assert_eq!((p.page, p.per_page), (1, 10));
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let q = BookingListQuery { status: Some("archived".into()), ..Default::default() };
        assert!(matches!(q.into_filter(), Err(ServiceError::Validation(_))));
    }
}
