//! Create `booking` table.
//!
//! A slot may be held by at most one non-cancelled booking: the partial unique
//! index below is the only thing that closes the race between two concurrent
//! admissions, so it must never be relaxed to a plain index.
use sea_orm_migration::{prelude::*, schema::*};
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(string_len(Booking::Name, 255).not_null())
                    .col(string_len(Booking::Email, 255).not_null())
                    .col(ColumnDef::new(Booking::Company).string_len(255).null())
                    .col(ColumnDef::new(Booking::Notes).text().null())
                    .col(date(Booking::Date).not_null())
                    .col(string_len(Booking::TimeSlot, 5).not_null())
                    .col(string_len(Booking::Status, 32).not_null().default("pending"))
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Booking::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // Partial indexes are not expressible through the index builder.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uniq_booking_active_slot \
                 ON booking (date, time_slot) WHERE status <> 'cancelled'",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    Name,
    Email,
    Company,
    Notes,
    Date,
    TimeSlot,
    Status,
    CreatedAt,
    UpdatedAt,
}
