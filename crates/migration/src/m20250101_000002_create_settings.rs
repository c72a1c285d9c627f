//! Create the singleton `settings` table and seed row `id = 1`.
//!
//! `working_days` is a comma separated list of weekday numbers (0 = Sunday).
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
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(integer(Settings::Id).primary_key())
                    .col(string_len(Settings::WorkingHoursStart, 5).not_null().default("09:00"))
                    .col(string_len(Settings::WorkingHoursEnd, 5).not_null().default("17:00"))
                    .col(string_len(Settings::WorkingDays, 32).not_null().default("1,2,3,4,5"))
                    .col(integer(Settings::MeetingDuration).not_null().default(30))
                    .col(string_len(Settings::Timezone, 50).not_null().default("America/New_York"))
                    .col(integer(Settings::MaxBookingsPerDay).not_null().default(10))
                    .col(boolean(Settings::EmailNotifications).not_null().default(true))
                    .col(string_len(Settings::CompanyEmail, 255).not_null().default("contact@novus.com"))
                    .col(string_len(Settings::CompanyPhone, 50).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("INSERT INTO settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Settings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    WorkingHoursStart,
    WorkingHoursEnd,
    WorkingDays,
    MeetingDuration,
    Timezone,
    MaxBookingsPerDay,
    EmailNotifications,
    CompanyEmail,
    CompanyPhone,
}
