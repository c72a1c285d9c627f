use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use service::notify::{self, NotificationQueue};

use crate::routes;
use crate::state::ServerState;

/// Pending notifications get this long to drain after the listener closes.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate, start the notification worker and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!(event = "migrations_applied", "database schema up to date");

    let notifier = notify::from_config(&cfg.notifier)?;
    let (queue, worker) = NotificationQueue::start(notifier, cfg.notifier.queue_capacity);

    let state = ServerState::with_database(db, &cfg, queue);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, event = "listening", "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    // The router (and with it every queue sender) is gone; let the worker finish.
    if tokio::time::timeout(DRAIN_TIMEOUT, worker).await.is_err() {
        warn!(event = "notification_drain_timeout", "dropping undelivered notifications");
    }
    Ok(())
}
