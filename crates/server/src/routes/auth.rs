use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};

use service::auth::domain::{AuthSession, LoginInput, RegisterInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::middleware::CurrentAdmin;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/api/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered", body = crate::openapi::SessionDoc), (status = 400, description = "Bad Request"), (status = 403, description = "Registration disabled"), (status = 409, description = "Conflict"))
)]
pub async fn register(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<AuthSession>), JsonApiError> {
    let session = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged In", body = crate::openapi::SessionDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn login(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<Json<AuthSession>, JsonApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(
    get, path = "/api/auth/profile", tag = "auth", security(("bearer" = [])),
    responses((status = 200, description = "Current admin", body = crate::openapi::AdminDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn profile(Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>) -> Json<Value> {
    Json(json!({ "admin": admin }))
}
