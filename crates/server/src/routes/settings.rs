use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use service::settings::SettingsUpdate;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/admin/settings", tag = "admin", security(("bearer" = [])),
    responses((status = 200, description = "Current settings", body = crate::openapi::SettingsDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn get(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let settings = state.settings.get().await?;
    Ok(Json(json!({ "settings": settings })))
}

#[utoipa::path(
    put, path = "/api/admin/settings", tag = "admin", security(("bearer" = [])),
    request_body = crate::openapi::SettingsDoc,
    responses((status = 200, description = "Updated settings", body = crate::openapi::SettingsDoc), (status = 400, description = "Invalid settings"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(upd): ApiJson<SettingsUpdate>,
) -> Result<Json<Value>, JsonApiError> {
    let settings = state.settings.update(upd).await?;
    Ok(Json(json!({ "message": "Settings updated", "settings": settings })))
}
