use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use service::db::newsletter_service::{self, Subscription};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailBody {
    pub email: String,
}

#[utoipa::path(
    post, path = "/api/newsletter/subscribe", tag = "newsletter",
    request_body = crate::openapi::EmailRequest,
    responses((status = 201, description = "Subscribed"), (status = 200, description = "Reactivated"), (status = 409, description = "Already subscribed"))
)]
pub async fn subscribe(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<EmailBody>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let res = state.store(newsletter_service::subscribe(&state.db, &body.email)).await?;
    Ok(match res {
        Subscription::Created(_) => (StatusCode::CREATED, Json(json!({ "message": "Subscribed successfully" }))),
        Subscription::Reactivated(_) => (StatusCode::OK, Json(json!({ "message": "Subscription reactivated" }))),
    })
}

#[utoipa::path(
    post, path = "/api/newsletter/unsubscribe", tag = "newsletter",
    request_body = crate::openapi::EmailRequest,
    responses((status = 200, description = "Unsubscribed"), (status = 404, description = "Unknown address"))
)]
pub async fn unsubscribe(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<EmailBody>,
) -> Result<Json<Value>, JsonApiError> {
    state.store(newsletter_service::unsubscribe(&state.db, &body.email)).await?;
    Ok(Json(json!({ "message": "Unsubscribed successfully" })))
}

#[utoipa::path(
    get, path = "/api/admin/newsletters", tag = "admin", security(("bearer" = [])),
    responses((status = 200, description = "Active subscribers, newest first"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let subscribers = state.store(newsletter_service::list_active_subscribers(&state.db)).await?;
    Ok(Json(json!({ "total": subscribers.len(), "subscribers": subscribers })))
}
