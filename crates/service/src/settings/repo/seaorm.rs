use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, Set, TransactionError, TransactionTrait,
};

use models::settings;

use crate::errors::ServiceError;
use crate::settings::domain::{Settings, SettingsUpdate};
use crate::settings::repository::SettingsRepository;

pub struct SeaOrmSettingsRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: settings::Model) -> Result<Settings, ServiceError> {
    Ok(Settings {
        working_days: settings::parse_working_days(&m.working_days)?,
        working_hours_start: m.working_hours_start,
        working_hours_end: m.working_hours_end,
        meeting_duration: m.meeting_duration,
        timezone: m.timezone,
        max_bookings_per_day: m.max_bookings_per_day,
        email_notifications: m.email_notifications,
        company_email: m.company_email,
        company_phone: m.company_phone,
    })
}

#[async_trait::async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn get(&self) -> Result<Settings, ServiceError> {
        to_domain(settings::get_or_init(&self.db).await?)
    }

    async fn update(&self, upd: SettingsUpdate) -> Result<Settings, ServiceError> {
        // the row must exist before it can be locked
        settings::get_or_init(&self.db).await?;
        self.db
            .transaction::<_, Settings, ServiceError>(|txn| {
                Box::pin(async move {
                    let row = settings::Entity::find_by_id(settings::SINGLETON_ID)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("settings"))?;
                    let next = to_domain(row)?.apply(upd)?;
                    let am = settings::ActiveModel {
                        id: Set(settings::SINGLETON_ID),
                        working_hours_start: Set(next.working_hours_start.clone()),
                        working_hours_end: Set(next.working_hours_end.clone()),
                        working_days: Set(settings::format_working_days(&next.working_days)),
                        meeting_duration: Set(next.meeting_duration),
                        timezone: Set(next.timezone.clone()),
                        max_bookings_per_day: Set(next.max_bookings_per_day),
                        email_notifications: Set(next.email_notifications),
                        company_email: Set(next.company_email.clone()),
                        company_phone: Set(next.company_phone.clone()),
                    };
                    to_domain(am.update(txn).await?)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db) => ServiceError::from(db),
                TransactionError::Transaction(e) => e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_support::get_db;

    #[tokio::test]
    async fn concurrent_partial_updates_keep_both_fields() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = Arc::new(SeaOrmSettingsRepository { db });
        let before = repo.get().await?;
        let tag = uuid::Uuid::new_v4().simple().to_string();
        let phone = format!("+1 555 {}", &tag[..6]);
        let email = format!("ops-{}@example.com", &tag[..8]);

        let a = {
            let repo = repo.clone();
            let phone = phone.clone();
            tokio::spawn(async move {
                repo.update(SettingsUpdate { company_phone: Some(phone), ..Default::default() }).await
            })
        };
        let b = {
            let repo = repo.clone();
            let email = email.clone();
            tokio::spawn(async move {
                repo.update(SettingsUpdate { company_email: Some(email), ..Default::default() }).await
            })
        };
        a.await??;
        b.await??;

        let after = repo.get().await?;
        assert_eq!(after.company_phone, phone);
        assert_eq!(after.company_email, email);

        repo.update(SettingsUpdate {
            company_phone: Some(before.company_phone),
            company_email: Some(before.company_email),
            ..Default::default()
        })
        .await?;
        Ok(())
    }
}
