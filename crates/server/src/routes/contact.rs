use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::db::contact_service::{self, ContactInput, ContactPage};
use service::notify::Notification;
use service::pagination::Pagination;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::admin::StatusBody;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    post, path = "/api/contact", tag = "contact",
    request_body = crate::openapi::ContactRequest,
    responses((status = 201, description = "Received"), (status = 400, description = "Validation failed"))
)]
pub async fn submit(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ContactInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let contact = state.store(contact_service::create_contact(&state.db, &input)).await?;
    state.notifications.submit(Notification::ContactReceived(contact.clone()));
    Ok((StatusCode::CREATED, Json(json!({ "message": "Message received", "contact": contact }))))
}

#[utoipa::path(
    get, path = "/api/admin/contacts", tag = "admin", security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "new|read|responded"),
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("limit" = Option<u32>, Query, description = "page size, max 100")
    ),
    responses((status = 200, description = "Contact messages, newest first"))
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ContactListQuery>,
) -> Result<Json<ContactPage>, JsonApiError> {
    let status = q.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let page = Pagination::new(q.page, q.limit);
    Ok(Json(state.store(contact_service::list_contacts(&state.db, status, page)).await?))
}

#[utoipa::path(
    patch, path = "/api/admin/contacts/{id}", tag = "admin", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Contact id")),
    request_body = crate::openapi::StatusRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Unknown status"), (status = 404, description = "Not found"))
)]
pub async fn update_status(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<Value>, JsonApiError> {
    let contact = state
        .store(contact_service::update_contact_status(&state.db, id, body.status.trim()))
        .await?;
    Ok(Json(json!({ "message": "Contact status updated", "contact": contact })))
}

pub async fn remove(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    state.store(contact_service::delete_contact(&state.db, id)).await?;
    Ok(Json(json!({ "message": "Contact deleted" })))
}
