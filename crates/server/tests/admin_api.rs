mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use support::app;

#[tokio::test]
async fn settings_round_trip_and_drive_slots() {
    let app = app().build();
    let token = app.admin_token().await;

    let r = app.send(Method::GET, "/api/admin/settings", Some(&token), None).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["settings"]["meeting_duration"], 30);
    assert_eq!(r.body["settings"]["email_notifications"], true);

    let r = app
        .send(Method::PUT, "/api/admin/settings", Some(&token), Some(json!({ "meeting_duration": 20, "working_days": [3, 1, 1] })))
        .await;
    assert_eq!(r.status, StatusCode::OK, "{}", r.body);
    assert_eq!(r.body["settings"]["working_days"], json!([1, 3]));

    // 2025-06-02 is a Monday
    let r = app.get("/api/bookings/available-slots?date=2025-06-02").await;
    assert_eq!(r.body["slots"], json!(["09:00", "09:20", "09:40"]));
}

#[tokio::test]
async fn invalid_settings_are_rejected_unchanged() {
    let app = app().build();
    let token = app.admin_token().await;

    for bad in [
        json!({ "working_hours_start": "11:00" }),
        json!({ "working_hours_end": "25:00" }),
        json!({ "meeting_duration": 0 }),
        json!({ "working_days": [7] }),
        json!({ "max_bookings_per_day": -1 }),
    ] {
        let r = app.send(Method::PUT, "/api/admin/settings", Some(&token), Some(bad.clone())).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST, "{bad}");
    }
    let r = app.send(Method::GET, "/api/admin/settings", Some(&token), None).await;
    assert_eq!(r.body["settings"]["working_hours_end"], "10:00");
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = app().build();
    for (method, uri) in [
        (Method::GET, "/api/admin/settings"),
        (Method::PUT, "/api/admin/settings"),
        (Method::GET, "/api/admin/bookings"),
        (Method::GET, "/api/admin/contacts"),
        (Method::GET, "/api/admin/newsletters"),
        (Method::GET, "/api/blog/admin/posts"),
        (Method::GET, "/api/auth/profile"),
    ] {
        let r = app.send(method.clone(), uri, None, None).await;
        assert_eq!(r.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn health_and_api_docs_are_public() {
    let app = app().build();
    let r = app.get("/health").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body, json!({ "status": "ok" }));

    let r = app.get("/api-docs/openapi.json").await;
    assert_eq!(r.status, StatusCode::OK);
    assert!(r.body["paths"]["/api/bookings"].is_object());
}

#[tokio::test]
async fn bad_ids_are_validated_before_the_store() {
    let app = app().build();
    let token = app.admin_token().await;
    // the state has no live database, so only pre-store validation can answer
    let r = app.get("/api/blog/posts/not-a-uuid").await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    let r = app
        .send(Method::PATCH, "/api/admin/contacts/not-a-uuid", Some(&token), Some(json!({ "status": "read" })))
        .await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    let r = app.post("/api/newsletter/subscribe", json!({ "email": "nope" })).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
}
