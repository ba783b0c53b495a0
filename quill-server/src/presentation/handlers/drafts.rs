use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::draft_service::SavedDraft;
use crate::domain::draft::{Draft, DraftFields};
use crate::domain::error::DomainError;
use crate::domain::generation::{Length, Tone};
use crate::domain::listing::ListSort;
use crate::domain::markdown::ExportFormat;
use crate::presentation::AppState;
use crate::presentation::app_error::{ApiJson, AppResult, ErrorBody};
use crate::presentation::handlers::SuccessDto;
use crate::presentation::handlers::posts::PostDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct DraftBodyDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    /// professional | casual | academic | conversational
    pub(crate) tone: Option<String>,
    /// short | medium | long
    pub(crate) length: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SaveDraftDto {
    /// Если указан, обновляется существующий черновик.
    pub(crate) id: Option<i64>,
    #[serde(flatten)]
    #[validate(nested)]
    pub(crate) body: DraftBodyDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct SortQuery {
    /// latest | earliest | highest-rated
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct ExportQuery {
    /// markdown | text
    pub(crate) format: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DraftDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) tone: Option<String>,
    pub(crate) length: Option<String>,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DraftListDto {
    pub(crate) drafts: Vec<DraftDto>,
    pub(crate) total: usize,
}

impl From<Draft> for DraftDto {
    fn from(draft: Draft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            content: draft.content,
            topic: draft.topic,
            tone: draft.tone.map(|tone| tone.as_str().to_string()),
            length: draft.length.map(|length| length.as_str().to_string()),
            author_id: draft.author_id,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }
}

impl TryFrom<DraftBodyDto> for DraftFields {
    type Error = DomainError;

    fn try_from(dto: DraftBodyDto) -> Result<Self, Self::Error> {
        Ok(Self {
            title: dto.title,
            content: dto.content,
            topic: dto.topic,
            tone: dto.tone.as_deref().map(str::parse::<Tone>).transpose()?,
            length: dto.length.as_deref().map(str::parse::<Length>).transpose()?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/drafts",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(SortQuery),
    responses(
        (status = 200, description = "Caller's drafts", body = DraftListDto),
        (status = 400, description = "Unknown sort", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn list_drafts(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<DraftListDto>> {
    let sort = ListSort::parse_param(query.sort.as_deref())?;
    let drafts = state.draft_service.list(auth.user_id, sort).await?;

    Ok(Json(DraftListDto {
        total: drafts.len(),
        drafts: drafts.into_iter().map(DraftDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/drafts/{id}",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Draft id")),
    responses(
        (status = 200, description = "Draft", body = DraftDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<DraftDto>> {
    let draft = state.draft_service.get(auth.user_id, id).await?;
    Ok(Json(draft.into()))
}

#[utoipa::path(
    post,
    path = "/api/drafts",
    tag = "drafts",
    security(("bearer_auth" = [])),
    request_body = SaveDraftDto,
    responses(
        (status = 201, description = "Draft created", body = DraftDto),
        (status = 200, description = "Draft updated", body = DraftDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody)
    )
)]
pub(crate) async fn save_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<SaveDraftDto>,
) -> AppResult<(StatusCode, Json<DraftDto>)> {
    dto.validate()?;
    let fields = DraftFields::try_from(dto.body)?;

    let saved = state
        .draft_service
        .save(auth.user_id, dto.id, fields)
        .await?;
    Ok(match saved {
        SavedDraft::Created(draft) => (StatusCode::CREATED, Json(draft.into())),
        SavedDraft::Updated(draft) => (StatusCode::OK, Json(draft.into())),
    })
}

#[utoipa::path(
    put,
    path = "/api/drafts/{id}",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Draft id")),
    request_body = DraftBodyDto,
    responses(
        (status = 200, description = "Draft updated", body = DraftDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    ApiJson(dto): ApiJson<DraftBodyDto>,
) -> AppResult<Json<DraftDto>> {
    dto.validate()?;
    let fields = DraftFields::try_from(dto)?;

    let draft = state.draft_service.update(auth.user_id, id, fields).await?;
    Ok(Json(draft.into()))
}

#[utoipa::path(
    delete,
    path = "/api/drafts/{id}",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Draft id")),
    responses(
        (status = 200, description = "Draft deleted", body = SuccessDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<SuccessDto>> {
    state.draft_service.delete(auth.user_id, id).await?;
    Ok(SuccessDto::ok())
}

#[utoipa::path(
    post,
    path = "/api/drafts/{id}/publish",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Draft id")),
    responses(
        (status = 201, description = "Post created from draft", body = PostDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody),
        (status = 409, description = "Slug already taken", body = ErrorBody)
    )
)]
pub(crate) async fn publish_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.publish_draft(auth.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    get,
    path = "/api/drafts/{id}/export",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Draft id"), ExportQuery),
    responses(
        (status = 200, description = "Draft file", content_type = "text/markdown", body = String),
        (status = 400, description = "Unknown format", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Draft not found", body = ErrorBody)
    )
)]
pub(crate) async fn export_draft(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let format = ExportFormat::parse_param(query.format.as_deref())?;
    let export = state.draft_service.export(auth.user_id, id, format).await?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    ))
}

#[cfg(test)]
mod tests {
    use super::{DraftBodyDto, SaveDraftDto};
    use crate::domain::draft::DraftFields;
    use crate::domain::error::DomainError;
    use crate::domain::generation::{Length, Tone};

    fn body(tone: Option<&str>, length: Option<&str>) -> DraftBodyDto {
        DraftBodyDto {
            title: "T".to_string(),
            content: "<p>c</p>".to_string(),
            topic: None,
            tone: tone.map(str::to_string),
            length: length.map(str::to_string),
        }
    }

    #[test]
    fn body_parses_tone_and_length() {
        let fields = DraftFields::try_from(body(Some("casual"), Some("long"))).expect("valid");
        assert_eq!(fields.tone, Some(Tone::Casual));
        assert_eq!(fields.length, Some(Length::Long));
    }

    #[test]
    fn unknown_tone_is_validation_error() {
        let err = DraftFields::try_from(body(Some("angry"), None)).expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { field: "tone", .. }));
    }

    #[test]
    fn save_body_accepts_optional_id() {
        let dto: SaveDraftDto = serde_json::from_str(
            r#"{"id":5,"title":"T","content":"<p>c</p>","tone":"academic"}"#,
        )
        .expect("must parse");
        assert_eq!(dto.id, Some(5));
        assert_eq!(dto.body.tone.as_deref(), Some("academic"));

        let dto: SaveDraftDto =
            serde_json::from_str(r#"{"title":"T","content":"<p>c</p>"}"#).expect("must parse");
        assert_eq!(dto.id, None);
    }
}
