use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::rating::{Rating, RatingSummary};
use crate::presentation::AppState;
use crate::presentation::app_error::{ApiJson, AppResult, ErrorBody};
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RateDto {
    #[validate(range(min = 1, max = 5))]
    pub(crate) value: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RatingDto {
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) value: i16,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RatingSummaryDto {
    pub(crate) average: f64,
    pub(crate) count: usize,
    /// Только для запроса с валидным токеном.
    pub(crate) user_rating: Option<i16>,
}

impl From<Rating> for RatingDto {
    fn from(rating: Rating) -> Self {
        Self {
            user_id: rating.user_id,
            post_id: rating.post_id,
            value: rating.value,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

impl From<RatingSummary> for RatingSummaryDto {
    fn from(summary: RatingSummary) -> Self {
        Self {
            average: summary.average,
            count: summary.count,
            user_rating: summary.user_rating,
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}/rating",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = RateDto,
    responses(
        (status = 200, description = "Rating stored", body = RatingDto),
        (status = 400, description = "Value outside 1..5", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn rate_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    ApiJson(dto): ApiJson<RateDto>,
) -> AppResult<Json<RatingDto>> {
    dto.validate()?;
    let rating = state.rating_service.rate(auth.user_id, id, dto.value).await?;
    Ok(Json(rating.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/ratings",
    tag = "ratings",
    security((), ("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Rating summary", body = RatingSummaryDto),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn post_ratings(
    State(state): State<AppState>,
    viewer: Option<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<RatingSummaryDto>> {
    let summary = state
        .rating_service
        .summary(id, viewer.map(|viewer| viewer.user_id))
        .await?;
    Ok(Json(summary.into()))
}
