use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::info;

use models::errors::ModelError;
use models::newsletter_subscriber;
use models::validate::validate_email;

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub enum Subscription {
    Created(newsletter_subscriber::Model),
    Reactivated(newsletter_subscriber::Model),
}

fn normalize(email: &str) -> Result<String, ServiceError> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    Ok(email)
}

/// Subscribe `email`; an already active address is a `Conflict`.
pub async fn subscribe(db: &DatabaseConnection, email: &str) -> Result<Subscription, ServiceError> {
    let email = normalize(email)?;
    if let Some(existing) = newsletter_subscriber::find_by_email(db, &email).await? {
        if existing.is_active {
            return Err(ServiceError::Conflict("already subscribed".into()));
        }
        let row = newsletter_subscriber::set_active(db, &email, true)
            .await?
            .ok_or_else(|| ServiceError::not_found("subscriber"))?;
        info!(subscriber_id = %row.id, "newsletter_reactivated");
        return Ok(Subscription::Reactivated(row));
    }
    match newsletter_subscriber::create(db, &email).await {
        Ok(row) => {
            info!(subscriber_id = %row.id, "newsletter_subscribed");
            Ok(Subscription::Created(row))
        }
        Err(ModelError::Conflict(_)) => Err(ServiceError::Conflict("already subscribed".into())),
        Err(e) => Err(e.into()),
    }
}

pub async fn unsubscribe(db: &DatabaseConnection, email: &str) -> Result<(), ServiceError> {
    let email = normalize(email)?;
    newsletter_subscriber::set_active(db, &email, false)
        .await?
        .ok_or_else(|| ServiceError::not_found("subscriber"))?;
    info!("newsletter_unsubscribed");
    Ok(())
}

pub async fn list_active_subscribers(db: &DatabaseConnection) -> Result<Vec<newsletter_subscriber::Model>, ServiceError> {
    Ok(newsletter_subscriber::Entity::find()
        .filter(newsletter_subscriber::Column::IsActive.eq(true))
        .order_by_desc(newsletter_subscriber::Column::SubscribedAt)
        .all(db)
        .await?)
}

pub async fn count_active_subscribers(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    Ok(newsletter_subscriber::Entity::find()
        .filter(newsletter_subscriber::Column::IsActive.eq(true))
        .count(db)
        .await?)
}
