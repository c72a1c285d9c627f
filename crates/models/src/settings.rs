use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Primary key of the only settings row.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub working_hours_start: String,
    pub working_hours_end: String,
    /// Comma separated weekday numbers, 0 = Sunday.
    pub working_days: String,
    pub meeting_duration: i32,
    pub timezone: String,
    pub max_bookings_per_day: i32,
    pub email_notifications: bool,
    pub company_email: String,
    pub company_phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn defaults() -> Model {
    Model {
        id: SINGLETON_ID,
        working_hours_start: "09:00".into(),
        working_hours_end: "17:00".into(),
        working_days: "1,2,3,4,5".into(),
        meeting_duration: 30,
        timezone: "America/New_York".into(),
        max_bookings_per_day: 10,
        email_notifications: true,
        company_email: "contact@novus.com".into(),
        company_phone: String::new(),
    }
}

pub fn parse_working_days(raw: &str) -> Result<Vec<u8>, ModelError> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: u8 = part
            .parse()
            .map_err(|_| ModelError::Validation(format!("invalid working day '{part}'")))?;
        if day > 6 {
            return Err(ModelError::Validation(format!("working day {day} out of range 0..=6")));
        }
        days.push(day);
    }
    days.sort_unstable();
    days.dedup();
    Ok(days)
}

pub fn format_working_days(days: &[u8]) -> String {
    days.iter().map(u8::to_string).collect::<Vec<_>>().join(",")
}

/// Fetch the singleton row, inserting defaults if a fresh schema has none.
pub async fn get_or_init(db: &DatabaseConnection) -> Result<Model, ModelError> {
    if let Some(found) = Entity::find_by_id(SINGLETON_ID).one(db).await? {
        return Ok(found);
    }
    let d = defaults();
    let am = ActiveModel {
        id: Set(d.id),
        working_hours_start: Set(d.working_hours_start),
        working_hours_end: Set(d.working_hours_end),
        working_days: Set(d.working_days),
        meeting_duration: Set(d.meeting_duration),
        timezone: Set(d.timezone),
        max_bookings_per_day: Set(d.max_bookings_per_day),
        email_notifications: Set(d.email_notifications),
        company_email: Set(d.company_email),
        company_phone: Set(d.company_phone),
    };
    Ok(am.insert(db).await?)
}
