use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::generation::{GeneratedArticle, GenerationRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{ApiJson, AppResult, ErrorBody};
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct GenerateDto {
    #[validate(length(max = 255))]
    pub(crate) title: Option<String>,
    pub(crate) topic: Option<String>,
    /// professional (по умолчанию) | casual | academic | conversational
    pub(crate) tone: Option<String>,
    /// short | medium (по умолчанию) | long
    pub(crate) length: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct GeneratedArticleDto {
    pub(crate) content: String,
    pub(crate) title: String,
    pub(crate) summary: String,
    #[serde(rename = "isFallback")]
    pub(crate) is_fallback: bool,
}

impl TryFrom<GenerateDto> for GenerationRequest {
    type Error = DomainError;

    fn try_from(dto: GenerateDto) -> Result<Self, Self::Error> {
        Ok(Self {
            title: dto.title.unwrap_or_default(),
            topic: dto.topic,
            tone: dto.tone.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
            length: dto
                .length
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl From<GeneratedArticle> for GeneratedArticleDto {
    fn from(article: GeneratedArticle) -> Self {
        Self {
            content: article.content,
            title: article.title,
            summary: article.summary,
            is_fallback: article.is_fallback,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    security(("bearer_auth" = [])),
    request_body = GenerateDto,
    responses(
        (status = 200, description = "Generated or templated article", body = GeneratedArticleDto),
        (status = 400, description = "Missing title or bad tone/length", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn generate(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<GenerateDto>,
) -> AppResult<Json<GeneratedArticleDto>> {
    dto.validate()?;
    let req = GenerationRequest::try_from(dto)?;

    let article = state.generation_service.generate(req).await?;
    Ok(Json(article.into()))
}

#[cfg(test)]
mod tests {
    use super::{GenerateDto, GeneratedArticleDto};
    use crate::domain::generation::{GenerationRequest, Length, Tone};

    #[test]
    fn fallback_flag_is_camel_case_on_the_wire() {
        let body = serde_json::to_value(GeneratedArticleDto {
            content: "<p>c</p>".to_string(),
            title: "t".to_string(),
            summary: "s".to_string(),
            is_fallback: true,
        })
        .expect("serialize");
        assert_eq!(body["isFallback"], true);
        assert!(body.get("is_fallback").is_none());
    }

    #[test]
    fn defaults_apply_for_missing_tone_and_length() {
        let dto: GenerateDto = serde_json::from_str(r#"{"title":"Hi"}"#).expect("must parse");
        let req = GenerationRequest::try_from(dto).expect("valid");
        assert_eq!(req.tone, Tone::Professional);
        assert_eq!(req.length, Length::Medium);
    }

    #[test]
    fn bad_length_is_rejected() {
        let dto: GenerateDto =
            serde_json::from_str(r#"{"title":"Hi","length":"epic"}"#).expect("must parse");
        assert!(GenerationRequest::try_from(dto).is_err());
    }
}
