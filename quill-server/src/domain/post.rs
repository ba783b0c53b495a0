use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

const SUMMARY_PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
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

/// Пост в публичной ленте вместе с автором и агрегатом оценок.
#[derive(Debug, Clone)]
pub(crate) struct PublishedPost {
    pub(crate) post: Post,
    pub(crate) author_username: String,
    pub(crate) average_rating: f64,
    pub(crate) rating_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) summary: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) published: bool,
}

impl CreatePostRequest {
    /// Нормализует поля и заполняет производные: slug из заголовка,
    /// summary из начала содержимого.
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = normalize_title(&self.title)?;
        let content = normalize_content(&self.content)?;
        let slug = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => normalize_slug(slug)?,
            _ => slugify(&title),
        };
        let summary = normalize_summary(self.summary).or_else(|| Some(summary_preview(&content)));

        Ok(Self {
            title,
            content,
            summary,
            slug: Some(slug),
            published: self.published,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) summary: Option<String>,
    pub(crate) published: bool,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            summary: normalize_summary(self.summary),
            published: self.published,
        })
    }
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        summary: Option<String>,
        slug: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
        author_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("author_id", author_id)?;
        let title = normalize_title(&title.into())?;
        let content = normalize_content(&content.into())?;
        let slug = normalize_slug(&slug.into())?;

        if updated_at < created_at {
            return Err(DomainError::validation("updated_at", "must be >= created_at"));
        }

        Ok(Self {
            id,
            title,
            content,
            summary,
            slug,
            published: published_at.is_some(),
            published_at,
            author_id,
            created_at,
            updated_at,
        })
    }
}

/// Заголовок → slug: всё, что не `[A-Za-z0-9]`, заменяется на `-`,
/// результат в нижнем регистре.
pub(crate) fn slugify(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

pub(crate) fn summary_preview(content: &str) -> String {
    content.chars().take(SUMMARY_PREVIEW_CHARS).collect()
}

/// Устойчивая сортировка по средней оценке: посты с равной оценкой
/// (в том числе без оценок) сохраняют входной порядок.
pub(crate) fn rank_by_rating(posts: &mut [PublishedPost]) {
    posts.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::validation(field, "must be > 0"));
    }
    Ok(())
}

pub(crate) fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::validation("title", "must be 1..255 chars"));
    }
    Ok(title.to_string())
}

pub(crate) fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::validation("content", "must not be empty"));
    }
    Ok(content.to_string())
}

fn normalize_slug(slug: &str) -> Result<String, DomainError> {
    let slug = slug.trim();
    if slug.is_empty() || slug.chars().count() > 255 {
        return Err(DomainError::validation("slug", "must be 1..255 chars"));
    }
    Ok(slug.to_string())
}

fn normalize_summary(summary: Option<String>) -> Option<String> {
    summary
        .map(|summary| summary.trim().to_string())
        .filter(|summary| !summary.is_empty())
}
