use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::{validate_email, validate_max_len, validate_required};

pub const STATUSES: [&str; 3] = ["new", "read", "responded"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_status(status: &str) -> Result<(), ModelError> {
    if !STATUSES.contains(&status) {
        return Err(ModelError::Validation(format!("status must be one of {}", STATUSES.join("|"))));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    subject: Option<&str>,
    message: &str,
) -> Result<Model, ModelError> {
    validate_required("name", name)?;
    validate_max_len("name", name, 255)?;
    validate_email(email)?;
    if let Some(s) = subject {
        validate_max_len("subject", s, 255)?;
    }
    validate_required("message", message)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        email: Set(email.to_string()),
        subject: Set(subject.map(str::to_string)),
        message: Set(message.trim().to_string()),
        status: Set(STATUSES[0].into()),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}
