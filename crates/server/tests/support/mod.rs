#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::build_router;
use server::ServerState;
use service::auth::domain::RegisterInput;
use service::auth::repository::mock::MockAuthRepository;
use service::auth::service::AuthConfig;
use service::booking::repository::mock::MockBookingRepository;
use service::notify::mock::RecordingNotifier;
use service::notify::NotificationQueue;
use service::settings::repository::mock::MockSettingsRepository;
use service::settings::Settings;

pub const SECRET: &str = "test-secret";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// One hour of 30-minute slots, every day of the week.
pub fn short_day() -> Settings {
    Settings {
        working_hours_start: "09:00".into(),
        working_hours_end: "10:00".into(),
        working_days: (0..=6).collect(),
        meeting_duration: 30,
        ..Settings::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub auth_repo: Arc<MockAuthRepository>,
    pub bookings: Arc<MockBookingRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

pub struct Builder {
    auth: AuthConfig,
    bookings: MockBookingRepository,
    settings: Settings,
}

impl Builder {
    pub fn auth(mut self, f: impl FnOnce(&mut AuthConfig)) -> Self {
        f(&mut self.auth);
        self
    }

    pub fn bookings(mut self, repo: MockBookingRepository) -> Self {
        self.bookings = repo;
        self
    }

    pub fn settings(mut self, s: Settings) -> Self {
        self.settings = s;
        self
    }

    /// Must run inside a tokio runtime; the notification worker is spawned here.
    pub fn build(self) -> TestApp {
        let auth_repo = Arc::new(MockAuthRepository::default());
        let bookings = Arc::new(self.bookings);
        let notifier = Arc::new(RecordingNotifier::default());
        let (queue, _worker) = NotificationQueue::start(notifier.clone(), 16);
        let state = ServerState::new(
            DatabaseConnection::Disconnected,
            auth_repo.clone(),
            bookings.clone(),
            Arc::new(MockSettingsRepository::with(self.settings)),
            self.auth,
            queue,
        );
        let router = build_router(state.clone(), CorsLayer::very_permissive());
        TestApp { router, state, auth_repo, bookings, notifier }
    }
}

pub fn app() -> Builder {
    Builder { auth: AuthConfig::with_secret(SECRET), bookings: MockBookingRepository::default(), settings: short_day() }
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub retry_after: Option<String>,
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap())),
            None => req.body(Body::empty()),
        }
        .unwrap();
        self.raw(req).await
    }

    pub async fn raw(&self, req: Request<Body>) -> Reply {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let retry_after = resp
            .headers()
            .get(header::RETRY_AFTER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Reply { status, body, retry_after }
    }

    pub async fn get(&self, uri: &str) -> Reply {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Reply {
        self.send(Method::POST, uri, None, Some(body)).await
    }

    /// Create `admin` / [`ADMIN_PASSWORD`] and return a login token.
    pub async fn admin_token(&self) -> String {
        self.state
            .auth
            .create_admin(RegisterInput {
                username: "admin".into(),
                email: "admin@example.com".into(),
                password: ADMIN_PASSWORD.into(),
            })
            .await
            .unwrap();
        let reply = self
            .post("/api/auth/login", serde_json::json!({ "username": "admin", "password": ADMIN_PASSWORD }))
            .await;
        assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
        reply.body["token"].as_str().unwrap().to_string()
    }

    /// Poll the recording notifier until `n` deliveries arrived.
    pub async fn wait_for_notifications(&self, n: usize) -> Vec<String> {
        for _ in 0..50 {
            let sent = self.notifier.sent();
            if sent.len() >= n {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.notifier.sent()
    }
}
