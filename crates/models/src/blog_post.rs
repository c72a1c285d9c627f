use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::{validate_max_len, validate_required};

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const DEFAULT_CATEGORY: &str = "General";
const EXCERPT_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    pub category: String,
    pub author: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_status(status: &str) -> Result<(), ModelError> {
    if status != STATUS_DRAFT && status != STATUS_PUBLISHED {
        return Err(ModelError::Validation("status must be draft|published".into()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    validate_required("title", title)?;
    validate_max_len("title", title, 255)
}

pub fn validate_label(field: &str, value: &str) -> Result<(), ModelError> {
    validate_max_len(field, value, 100)
}

/// First 200 characters of the content, used when no excerpt is supplied.
pub fn default_excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}

/// Fully resolved column values for a new post.
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: Option<&'a str>,
    pub category: Option<&'a str>,
    pub author: &'a str,
    pub image_url: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub async fn create(db: &DatabaseConnection, post: NewPost<'_>) -> Result<Model, ModelError> {
    validate_title(post.title)?;
    validate_required("content", post.content)?;
    let category = post.category.filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_CATEGORY);
    validate_label("category", category)?;
    validate_label("author", post.author)?;
    let status = post.status.unwrap_or(STATUS_DRAFT);
    validate_status(status)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(post.title.trim().to_string()),
        content: Set(post.content.to_string()),
        excerpt: Set(Some(post.excerpt.map(str::to_string).unwrap_or_else(|| default_excerpt(post.content)))),
        category: Set(category.to_string()),
        author: Set(post.author.to_string()),
        image_url: Set(post.image_url.map(str::to_string)),
        status: Set(status.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
