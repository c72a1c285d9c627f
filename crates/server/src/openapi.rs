use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct AdminDoc { pub id: Uuid, pub username: String, pub email: String, pub role: String }

#[derive(ToSchema)]
pub struct SessionDoc { pub admin: AdminDoc, pub token: String }

#[derive(ToSchema)]
pub struct SlotsResponse {
    pub date: String,
    /// `HH:MM` labels, ascending
    pub slots: Vec<String>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, one of the offered slots
    pub timeSlot: String,
}

#[derive(ToSchema)]
pub struct BookingDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub date: String,
    pub time_slot: String,
    /// pending | confirmed | completed | cancelled
    pub status: String,
}

#[derive(ToSchema)]
pub struct StatusRequest { pub status: String }

#[derive(ToSchema)]
pub struct SettingsDoc {
    pub working_hours_start: String,
    pub working_hours_end: String,
    /// 0 = Sunday
    pub working_days: Vec<u8>,
    pub meeting_duration: i32,
    pub timezone: String,
    pub max_bookings_per_day: i32,
    pub email_notifications: bool,
    pub company_email: String,
    pub company_phone: String,
}

#[derive(ToSchema)]
pub struct ContactRequest { pub name: String, pub email: String, pub subject: Option<String>, pub message: String }

#[derive(ToSchema)]
pub struct EmailRequest { pub email: String }

#[derive(ToSchema)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    /// draft | published
    pub status: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::profile,
        crate::routes::bookings::available_slots,
        crate::routes::bookings::create,
        crate::routes::admin::stats,
        crate::routes::admin::list_bookings,
        crate::routes::admin::update_booking_status,
        crate::routes::admin::delete_booking,
        crate::routes::settings::get,
        crate::routes::settings::update,
        crate::routes::contact::submit,
        crate::routes::contact::list,
        crate::routes::contact::update_status,
        crate::routes::newsletter::subscribe,
        crate::routes::newsletter::unsubscribe,
        crate::routes::newsletter::list,
        crate::routes::blog::list_published,
        crate::routes::blog::get_published,
        crate::routes::blog::categories,
        crate::routes::blog::list_all,
        crate::routes::blog::create,
        crate::routes::blog::update,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AdminDoc,
            SessionDoc,
            SlotsResponse,
            BookingRequest,
            BookingDoc,
            StatusRequest,
            SettingsDoc,
            ContactRequest,
            EmailRequest,
            PostRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "bookings"),
        (name = "admin"),
        (name = "contact"),
        (name = "newsletter"),
        (name = "blog")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_booking_paths() {
        let doc = ApiDoc::openapi();
        for p in ["/api/bookings", "/api/bookings/available-slots", "/api/admin/bookings/{id}", "/api/auth/login"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }
}
