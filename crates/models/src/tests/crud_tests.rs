use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use anyhow::Result;
use uuid::Uuid;

use super::{scratch_date, setup_test_db};
use crate::{admin, blog_post, booking, contact_message, newsletter_subscriber, settings};

#[tokio::test]
async fn test_admin_create_and_lookup() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let username = format!("admin_{}", Uuid::new_v4().simple());
    let email = format!("{}@example.com", username);
    let created = admin::create(&db, &username, &email, "$argon2id$stub".into()).await?;
    assert_eq!(created.role, admin::DEFAULT_ROLE);

    let by_name = admin::find_by_username(&db, &username).await?.unwrap();
    assert_eq!(by_name.id, created.id);
    let by_email = admin::find_by_email(&db, &email).await?.unwrap();
    assert_eq!(by_email.id, created.id);

    admin::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_settings_singleton_exists() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let s = settings::get_or_init(&db).await?;
    assert_eq!(s.id, settings::SINGLETON_ID);
    assert!(settings::parse_working_days(&s.working_days).is_ok());
    let again = settings::get_or_init(&db).await?;
    assert_eq!(again.id, s.id);
    Ok(())
}

#[tokio::test]
async fn test_booking_create_defaults_to_pending() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let date = scratch_date();
    let b = booking::create(&db, "Jane", "jane@example.com", Some("Acme"), None, date, "10:00").await?;
    assert_eq!(b.status, booking::STATUS_PENDING);
    assert_eq!(b.date, date);
    assert_eq!(b.company.as_deref(), Some("Acme"));

    booking::Entity::delete_by_id(b.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_contact_and_newsletter_roundtrip() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let msg = contact_message::create(&db, "Bob", "bob@example.com", Some("Hi"), "hello there").await?;
    assert_eq!(msg.status, "new");
    let mut am: contact_message::ActiveModel = msg.clone().into();
    am.status = Set("read".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.status, "read");
    contact_message::Entity::delete_by_id(msg.id).exec(&db).await?;

    let email = format!("news_{}@example.com", Uuid::new_v4().simple());
    let sub = newsletter_subscriber::create(&db, &email).await?;
    assert!(sub.is_active);
    let off = newsletter_subscriber::set_active(&db, &email, false).await?.unwrap();
    assert!(!off.is_active);
    let missing = format!("missing_{}@example.com", Uuid::new_v4().simple());
    assert!(newsletter_subscriber::set_active(&db, &missing, false).await?.is_none());
    newsletter_subscriber::Entity::delete_by_id(sub.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_blog_post_defaults() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let content = "x".repeat(300);
    let post = blog_post::create(&db, blog_post::NewPost {
        title: "Hello",
        content: &content,
        excerpt: None,
        category: None,
        author: "admin",
        image_url: None,
        status: None,
    }).await?;
    assert_eq!(post.status, blog_post::STATUS_DRAFT);
    assert_eq!(post.category, blog_post::DEFAULT_CATEGORY);
    assert_eq!(post.excerpt.as_deref().map(|e| e.len()), Some(200));

    blog_post::Entity::delete_by_id(post.id).exec(&db).await?;
    Ok(())
}
