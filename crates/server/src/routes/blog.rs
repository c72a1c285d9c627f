use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::db::blog_service::{self, BlogPage, BlogPostInput, BlogPostUpdate};
use service::pagination::Pagination;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::CurrentAdmin;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn given(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[utoipa::path(
    get, path = "/api/blog/posts", tag = "blog",
    params(
        ("category" = Option<String>, Query, description = "Exact category"),
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("limit" = Option<u32>, Query, description = "page size, max 100")
    ),
    responses((status = 200, description = "Published posts, newest first"))
)]
pub async fn list_published(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<PostListQuery>,
) -> Result<Json<BlogPage>, JsonApiError> {
    let page = Pagination::new(q.page, q.limit);
    Ok(Json(state.store(blog_service::list_published(&state.db, given(&q.category), page)).await?))
}

#[utoipa::path(
    get, path = "/api/blog/posts/{id}", tag = "blog",
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 200, description = "Post"), (status = 404, description = "Missing or unpublished"))
)]
pub async fn get_published(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let post = state.store(blog_service::find_published(&state.db, id)).await?;
    Ok(Json(json!({ "post": post })))
}

#[utoipa::path(get, path = "/api/blog/categories", tag = "blog", responses((status = 200, description = "Categories of published posts")))]
pub async fn categories(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let categories = state.store(blog_service::categories(&state.db)).await?;
    Ok(Json(json!({ "categories": categories })))
}

#[utoipa::path(
    get, path = "/api/blog/admin/posts", tag = "blog", security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "draft|published"),
        ("category" = Option<String>, Query, description = "Exact category"),
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("limit" = Option<u32>, Query, description = "page size, max 100")
    ),
    responses((status = 200, description = "All posts"))
)]
pub async fn list_all(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<PostListQuery>,
) -> Result<Json<BlogPage>, JsonApiError> {
    let page = Pagination::new(q.page, q.limit);
    let fut = blog_service::list_all(&state.db, given(&q.status), given(&q.category), page);
    Ok(Json(state.store(fut).await?))
}

pub async fn get_any(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let post = state.store(blog_service::find_post(&state.db, id)).await?;
    Ok(Json(json!({ "post": post })))
}

#[utoipa::path(
    post, path = "/api/blog/admin/posts", tag = "blog", security(("bearer" = [])),
    request_body = crate::openapi::PostRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation failed"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
    ApiJson(input): ApiJson<BlogPostInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let post = state.store(blog_service::create_post(&state.db, &input, &admin.username)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Post created", "post": post }))))
}

#[utoipa::path(
    put, path = "/api/blog/admin/posts/{id}", tag = "blog", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = crate::openapi::PostRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(upd): ApiJson<BlogPostUpdate>,
) -> Result<Json<Value>, JsonApiError> {
    let post = state.store(blog_service::update_post(&state.db, id, &upd)).await?;
    Ok(Json(json!({ "message": "Post updated", "post": post })))
}

pub async fn remove(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    state.store(blog_service::delete_post(&state.db, id)).await?;
    Ok(Json(json!({ "message": "Post deleted" })))
}
