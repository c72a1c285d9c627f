use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use service::auth::domain::AdminProfile;
use service::auth::errors::AuthError;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Admin resolved by [`require_admin`], available to handlers as an extension.
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub AdminProfile);

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Reject the request unless it carries a valid admin bearer token.
/// Missing, malformed, expired and unknown-admin tokens all get the same 401.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        debug!(path = %req.uri().path(), "missing bearer token");
        return Err(JsonApiError::unauthenticated());
    };
    match state.auth.authenticate(&token).await {
        Ok(admin) => {
            req.extensions_mut().insert(CurrentAdmin(admin));
            Ok(next.run(req).await)
        }
        Err(e @ AuthError::StoreUnavailable(_)) => Err(e.into()),
        Err(e) => {
            debug!(path = %req.uri().path(), err = %e, "bearer token rejected");
            Err(JsonApiError::unauthenticated())
        }
    }
}
