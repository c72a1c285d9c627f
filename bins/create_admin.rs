//! Create an admin account directly in the database.
//!
//! ```text
//! create_admin --username alice --email alice@example.com --password 's3cret!'
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use migration::{Migrator, MigratorTrait};
use service::auth::domain::RegisterInput;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

#[derive(Debug, Parser)]
#[command(name = "create_admin", about = "Create an admin account")]
struct Args {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    /// Falls back to ADMIN_PASSWORD so it stays out of shell history.
    #[arg(long, env = "ADMIN_PASSWORD")]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    let args = Args::parse();

    let cfg = configs::AppConfig::load_and_validate().context("loading configuration")?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmAuthRepository { db });
    let auth = AuthService::new(repo, AuthConfig::from_app(&cfg));
    let admin = auth
        .create_admin(RegisterInput { username: args.username, email: args.email, password: args.password })
        .await
        .map_err(|e| anyhow::anyhow!("could not create admin: {e}"))?;

    info!(admin_id = %admin.id, username = %admin.username, event = "admin_created", "admin created");
    println!("created admin {} ({})", admin.username, admin.id);
    Ok(())
}
