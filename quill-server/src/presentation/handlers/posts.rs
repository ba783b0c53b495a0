use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::listing::ListSort;
use crate::domain::post::{CreatePostRequest, Post, PublishedPost, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{ApiJson, AppResult, ErrorBody};
use crate::presentation::handlers::SuccessDto;
use crate::presentation::handlers::drafts::SortQuery;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) summary: Option<String>,
    /// По умолчанию выводится из заголовка.
    #[validate(length(max = 255))]
    pub(crate) slug: Option<String>,
    #[serde(default)]
    pub(crate) published: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) summary: Option<String>,
    #[serde(default)]
    pub(crate) published: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) summary: Option<String>,
    pub(crate) slug: String,
    pub(crate) published: bool,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PublishedPostDto {
    #[serde(flatten)]
    pub(crate) post: PostDto,
    pub(crate) author_username: String,
    pub(crate) average_rating: f64,
    pub(crate) rating_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListDto {
    pub(crate) posts: Vec<PublishedPostDto>,
    pub(crate) total: usize,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            summary: post.summary,
            slug: post.slug,
            published: post.published,
            published_at: post.published_at,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PublishedPost> for PublishedPostDto {
    fn from(listed: PublishedPost) -> Self {
        Self {
            post: listed.post.into(),
            author_username: listed.author_username,
            average_rating: listed.average_rating,
            rating_count: listed.rating_count,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(SortQuery),
    responses(
        (status = 200, description = "Published posts", body = PostListDto),
        (status = 400, description = "Unknown sort", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<PostListDto>> {
    let sort = ListSort::parse_param(query.sort.as_deref())?;
    let posts = state.post_service.list_published(sort).await?;

    Ok(Json(PostListDto {
        total: posts.len(),
        posts: posts.into_iter().map(PublishedPostDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Published post", body = PostDto),
        (status = 404, description = "Post not found or not published", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.post_service.get_published(id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 409, description = "Slug already taken", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        summary: dto.summary,
        slug: dto.slug,
        published: dto.published,
    };

    let post = state.post_service.create(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    ApiJson(dto): ApiJson<UpdatePostDto>,
) -> AppResult<Json<PostDto>> {
    dto.validate()?;
    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
        summary: dto.summary,
        published: dto.published,
    };

    let post = state.post_service.update(auth.user_id, id, req).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = SuccessDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<SuccessDto>> {
    state.post_service.delete(auth.user_id, id).await?;
    Ok(SuccessDto::ok())
}
