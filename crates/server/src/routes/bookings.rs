use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use service::booking::NewBooking;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

#[utoipa::path(
    get, path = "/api/bookings/available-slots", tag = "bookings",
    params(("date" = String, Query, description = "YYYY-MM-DD")),
    responses((status = 200, description = "Free slots, ascending", body = crate::openapi::SlotsResponse), (status = 400, description = "Bad date"))
)]
pub async fn available_slots(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<SlotsQuery>,
) -> Result<Json<Value>, JsonApiError> {
    let date = q.date.ok_or_else(|| JsonApiError::validation("date is required"))?;
    let slots = state.bookings.available_slots(&date).await?;
    Ok(Json(json!({ "date": date.trim(), "slots": slots })))
}

#[utoipa::path(
    post, path = "/api/bookings", tag = "bookings",
    request_body = crate::openapi::BookingRequest,
    responses(
        (status = 201, description = "Booked", body = crate::openapi::BookingDoc),
        (status = 400, description = "Validation failed or slot not offered"),
        (status = 409, description = "Slot already taken"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let booking = state.bookings.admit(req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Booking created successfully", "booking": booking }))))
}
