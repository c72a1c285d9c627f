//! Migrator registering table migrations in dependency order.
//! Secondary indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admin;
mod m20250101_000002_create_settings;
mod m20250101_000003_create_booking;
mod m20250101_000004_create_contact_message;
mod m20250101_000005_create_newsletter_subscriber;
mod m20250101_000006_create_blog_post;
mod m20250101_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_admin::Migration),
            Box::new(m20250101_000002_create_settings::Migration),
            Box::new(m20250101_000003_create_booking::Migration),
            Box::new(m20250101_000004_create_contact_message::Migration),
            Box::new(m20250101_000005_create_newsletter_subscriber::Migration),
            Box::new(m20250101_000006_create_blog_post::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000007_add_indexes::Migration),
        ]
    }
}
