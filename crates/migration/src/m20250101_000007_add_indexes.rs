use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str)] = &[
    ("idx_booking_date", "booking"),
    ("idx_booking_status", "booking"),
    ("idx_booking_created", "booking"),
    ("idx_contact_status", "contact_message"),
    ("idx_blog_status", "blog_post"),
    ("idx_blog_category", "blog_post"),
    ("idx_blog_created", "blog_post"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Booking: slot lookups by date, dashboard counts by status, recent list
        manager
            .create_index(Index::create().if_not_exists().name("idx_booking_date").table(Booking::Table).col(Booking::Date).to_owned())
            .await?;
        manager
            .create_index(Index::create().if_not_exists().name("idx_booking_status").table(Booking::Table).col(Booking::Status).to_owned())
            .await?;
        manager
            .create_index(Index::create().if_not_exists().name("idx_booking_created").table(Booking::Table).col(Booking::CreatedAt).to_owned())
            .await?;

        manager
            .create_index(Index::create().if_not_exists().name("idx_contact_status").table(ContactMessage::Table).col(ContactMessage::Status).to_owned())
            .await?;

        // Blog: public listing filters on status/category, ordered by creation time
        manager
            .create_index(Index::create().if_not_exists().name("idx_blog_status").table(BlogPost::Table).col(BlogPost::Status).to_owned())
            .await?;
        manager
            .create_index(Index::create().if_not_exists().name("idx_blog_category").table(BlogPost::Table).col(BlogPost::Category).to_owned())
            .await?;
        manager
            .create_index(Index::create().if_not_exists().name("idx_blog_created").table(BlogPost::Table).col(BlogPost::CreatedAt).to_owned())
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in INDEXES {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Booking { Table, Date, Status, CreatedAt }

#[derive(DeriveIden)]
enum ContactMessage { Table, Status }

#[derive(DeriveIden)]
enum BlogPost { Table, Status, Category, CreatedAt }
