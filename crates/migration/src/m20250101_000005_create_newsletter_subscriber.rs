//! Create `newsletter_subscriber` table; one row per email, toggled via `is_active`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsletterSubscriber::Table)
                    .if_not_exists()
                    .col(uuid(NewsletterSubscriber::Id).primary_key())
                    .col(string_len(NewsletterSubscriber::Email, 255).unique_key().not_null())
                    .col(boolean(NewsletterSubscriber::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(NewsletterSubscriber::SubscribedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(NewsletterSubscriber::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum NewsletterSubscriber { Table, Id, Email, IsActive, SubscribedAt }
