/// CRUD operations against a migrated database
pub mod crud_tests;

/// Unique-index and error-mapping behavior
pub mod constraint_tests;

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

/// Connect and migrate, or `None` when the database is unreachable or
/// `SKIP_DB_TESTS` is set.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

/// A far-future date unique enough that reruns do not collide on the slot index.
pub(crate) fn scratch_date() -> chrono::NaiveDate {
    let offset = (uuid::Uuid::new_v4().as_u128() % 200_000) as u64;
    chrono::NaiveDate::from_ymd_opt(2200, 1, 1).unwrap() + chrono::Days::new(offset)
}
