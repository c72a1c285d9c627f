use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use anyhow::Result;
use uuid::Uuid;

use super::{scratch_date, setup_test_db};
use crate::errors::ModelError;
use crate::{admin, booking};

#[tokio::test]
async fn test_active_slot_is_unique() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let date = scratch_date();
    let first = booking::create(&db, "A", "a@example.com", None, None, date, "09:00").await?;
    let second = booking::create(&db, "B", "b@example.com", None, None, date, "09:00").await;
    assert!(matches!(second, Err(ModelError::Conflict(_))), "got {:?}", second);

    // a cancelled booking releases the slot
    let mut am: booking::ActiveModel = first.clone().into();
    am.status = Set(booking::STATUS_CANCELLED.into());
    am.update(&db).await?;
    let third = booking::create(&db, "C", "c@example.com", None, None, date, "09:00").await?;

    booking::Entity::delete_by_id(first.id).exec(&db).await?;
    booking::Entity::delete_by_id(third.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_admin_maps_to_conflict() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let username = format!("dup_{}", Uuid::new_v4().simple());
    let a = admin::create(&db, &username, &format!("{username}@example.com"), "h".into()).await?;
    let b = admin::create(&db, &username, &format!("{username}.2@example.com"), "h".into()).await;
    assert!(matches!(b, Err(ModelError::Conflict(_))));

    admin::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}

#[test]
fn test_create_validates_before_touching_db() {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let db = sea_orm::DatabaseConnection::Disconnected;
    let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let res = rt.block_on(booking::create(&db, "", "a@example.com", None, None, date, "09:00"));
    assert!(matches!(res, Err(ModelError::Validation(_))));
    let res = rt.block_on(booking::create(&db, "A", "not-an-email", None, None, date, "09:00"));
    assert!(matches!(res, Err(ModelError::Validation(_))));
    let res = rt.block_on(booking::create(&db, "A", "a@example.com", None, None, date, "9am"));
    assert!(matches!(res, Err(ModelError::Validation(_))));
}
