use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::{parse_hhmm, validate_email, validate_max_len, validate_required};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub date: Date,
    pub time_slot: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a `pending` booking. A live booking already holding the same
/// (date, time_slot) makes the insert fail with `ModelError::Conflict`.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    company: Option<&str>,
    notes: Option<&str>,
    date: NaiveDate,
    time_slot: &str,
) -> Result<Model, ModelError> {
    validate_required("name", name)?;
    validate_max_len("name", name, 255)?;
    validate_email(email)?;
    if let Some(c) = company {
        validate_max_len("company", c, 255)?;
    }
    parse_hhmm(time_slot)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        email: Set(email.to_string()),
        company: Set(company.map(str::to_string)),
        notes: Set(notes.map(str::to_string)),
        date: Set(date),
        time_slot: Set(time_slot.to_string()),
        status: Set(STATUS_PENDING.into()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
