use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use common::types::PageMeta;
use models::contact_message;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    pub contacts: Vec<contact_message::Model>,
    pub pagination: PageMeta,
}

/// Store a contact form submission with status `new`.
pub async fn create_contact(db: &DatabaseConnection, input: &ContactInput) -> Result<contact_message::Model, ServiceError> {
    let subject = input.subject.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let created = contact_message::create(db, &input.name, input.email.trim(), subject, &input.message).await?;
    info!(contact_id = %created.id, "contact_received");
    Ok(created)
}

/// Newest first, optionally filtered by status.
pub async fn list_contacts(db: &DatabaseConnection, status: Option<&str>, opts: Pagination) -> Result<ContactPage, ServiceError> {
    let mut q = contact_message::Entity::find();
    if let Some(s) = status {
        contact_message::validate_status(s)?;
        q = q.filter(contact_message::Column::Status.eq(s));
    }
    let (page_idx, per_page) = opts.normalize();
    let paginator = q.order_by_desc(contact_message::Column::CreatedAt).paginate(db, per_page);
    let total = paginator.num_items().await?;
    let contacts = paginator.fetch_page(page_idx).await?;
    Ok(ContactPage { contacts, pagination: opts.meta(total) })
}

pub async fn update_contact_status(db: &DatabaseConnection, id: Uuid, status: &str) -> Result<contact_message::Model, ServiceError> {
    contact_message::validate_status(status)?;
    let found = contact_message::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("contact"))?;
    let mut am: contact_message::ActiveModel = found.into();
    am.status = Set(status.to_string());
    Ok(am.update(db).await?)
}

pub async fn delete_contact(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = contact_message::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("contact"));
    }
    Ok(())
}

pub async fn count_contacts_by_status(db: &DatabaseConnection, status: &str) -> Result<u64, ServiceError> {
    Ok(contact_message::Entity::find()
        .filter(contact_message::Column::Status.eq(status))
        .count(db)
        .await?)
}
