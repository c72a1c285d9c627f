use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::middleware::require_admin;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod admin;
pub mod auth;
pub mod blog;
pub mod bookings;
pub mod contact;
pub mod newsletter;
pub mod settings;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public site endpoints, admin endpoints
/// behind the bearer gate, and the API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/bookings", post(bookings::create))
        .route("/api/bookings/available-slots", get(bookings::available_slots))
        .route("/api/contact", post(contact::submit))
        .route("/api/newsletter/subscribe", post(newsletter::subscribe))
        .route("/api/newsletter/unsubscribe", post(newsletter::unsubscribe))
        .route("/api/blog/posts", get(blog::list_published))
        .route("/api/blog/posts/:id", get(blog::get_published))
        .route("/api/blog/categories", get(blog::categories));

    let admin_routes = Router::new()
        .route("/api/auth/profile", get(auth::profile))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route(
            "/api/admin/bookings/:id",
            get(admin::get_booking).patch(admin::update_booking_status).delete(admin::delete_booking),
        )
        .route("/api/admin/contacts", get(contact::list))
        .route("/api/admin/contacts/:id", patch(contact::update_status).delete(contact::remove))
        .route("/api/admin/newsletters", get(newsletter::list))
        .route("/api/admin/settings", get(settings::get).put(settings::update))
        .route("/api/blog/admin/posts", get(blog::list_all).post(blog::create))
        .route("/api/blog/admin/posts/:id", get(blog::get_any).put(blog::update).delete(blog::remove))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
