use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use common::types::PageMeta;
use models::blog_post::{self, NewPost};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
}

/// Partial update. Absent or empty fields keep their value, except
/// `image_url` where an empty string clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPage {
    pub posts: Vec<blog_post::Model>,
    pub pagination: PageMeta,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

async fn page_of(
    db: &DatabaseConnection,
    cond: Condition,
    opts: Pagination,
) -> Result<BlogPage, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let paginator = blog_post::Entity::find()
        .filter(cond)
        .order_by_desc(blog_post::Column::CreatedAt)
        .paginate(db, per_page);
    let total = paginator.num_items().await?;
    let posts = paginator.fetch_page(page_idx).await?;
    Ok(BlogPage { posts, pagination: opts.meta(total) })
}

/// Published posts, newest first.
pub async fn list_published(db: &DatabaseConnection, category: Option<&str>, opts: Pagination) -> Result<BlogPage, ServiceError> {
    let mut cond = Condition::all().add(blog_post::Column::Status.eq(blog_post::STATUS_PUBLISHED));
    if let Some(c) = category {
        cond = cond.add(blog_post::Column::Category.eq(c));
    }
    page_of(db, cond, opts).await
}

/// All posts regardless of status, for the admin console.
pub async fn list_all(
    db: &DatabaseConnection,
    status: Option<&str>,
    category: Option<&str>,
    opts: Pagination,
) -> Result<BlogPage, ServiceError> {
    let mut cond = Condition::all();
    if let Some(s) = status {
        blog_post::validate_status(s)?;
        cond = cond.add(blog_post::Column::Status.eq(s));
    }
    if let Some(c) = category {
        cond = cond.add(blog_post::Column::Category.eq(c));
    }
    page_of(db, cond, opts).await
}

pub async fn find_post(db: &DatabaseConnection, id: Uuid) -> Result<blog_post::Model, ServiceError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("post"))
}

/// A post visible to the public; drafts read as not found.
pub async fn find_published(db: &DatabaseConnection, id: Uuid) -> Result<blog_post::Model, ServiceError> {
    let post = find_post(db, id).await?;
    if post.status != blog_post::STATUS_PUBLISHED {
        return Err(ServiceError::not_found("post"));
    }
    Ok(post)
}

/// Distinct categories of published posts, alphabetical.
pub async fn categories(db: &DatabaseConnection) -> Result<Vec<String>, ServiceError> {
    Ok(blog_post::Entity::find()
        .select_only()
        .column(blog_post::Column::Category)
        .distinct()
        .filter(blog_post::Column::Status.eq(blog_post::STATUS_PUBLISHED))
        .order_by_asc(blog_post::Column::Category)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

/// Create a post; `default_author` is used when the input names none.
pub async fn create_post(db: &DatabaseConnection, input: &BlogPostInput, default_author: &str) -> Result<blog_post::Model, ServiceError> {
    let post = blog_post::create(db, NewPost {
        title: &input.title,
        content: &input.content,
        excerpt: present(&input.excerpt),
        category: present(&input.category),
        author: present(&input.author).unwrap_or(default_author),
        image_url: present(&input.image_url),
        status: present(&input.status),
    })
    .await?;
    info!(post_id = %post.id, status = %post.status, "blog_post_created");
    Ok(post)
}

pub async fn update_post(db: &DatabaseConnection, id: Uuid, upd: &BlogPostUpdate) -> Result<blog_post::Model, ServiceError> {
    let existing = find_post(db, id).await?;
    let mut am: blog_post::ActiveModel = existing.into();
    if let Some(t) = present(&upd.title) {
        blog_post::validate_title(t)?;
        am.title = Set(t.to_string());
    }
    if let Some(c) = upd.content.as_deref().filter(|c| !c.trim().is_empty()) {
        am.content = Set(c.to_string());
    }
    if let Some(e) = present(&upd.excerpt) {
        am.excerpt = Set(Some(e.to_string()));
    }
    if let Some(c) = present(&upd.category) {
        blog_post::validate_label("category", c)?;
        am.category = Set(c.to_string());
    }
    if let Some(a) = present(&upd.author) {
        blog_post::validate_label("author", a)?;
        am.author = Set(a.to_string());
    }
    if let Some(url) = upd.image_url.as_deref() {
        let url = url.trim();
        am.image_url = Set((!url.is_empty()).then(|| url.to_string()));
    }
    if let Some(s) = present(&upd.status) {
        blog_post::validate_status(s)?;
        am.status = Set(s.to_string());
    }
    am.updated_at = Set(Utc::now().into());
    let post = am.update(db).await?;
    info!(post_id = %post.id, "blog_post_updated");
    Ok(post)
}

pub async fn delete_post(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = blog_post::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("post"));
    }
    info!(post_id = %id, "blog_post_deleted");
    Ok(())
}
