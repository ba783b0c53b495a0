use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::draft_repository::DraftRepository;
use crate::domain::draft::{Draft, DraftFields};
use crate::domain::error::DomainError;
use crate::domain::generation::{Length, Tone};
use crate::domain::listing::Recency;

const DRAFT_COLUMNS: &str =
    "id, title, content, topic, tone, length, author_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub(crate) struct PostgresDraftRepository {
    pool: PgPool,
}

impl PostgresDraftRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DraftRow {
    id: i64,
    title: String,
    content: String,
    topic: Option<String>,
    tone: Option<String>,
    length: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl DraftRepository for PostgresDraftRepository {
    async fn create_draft(
        &self,
        author_id: i64,
        fields: DraftFields,
    ) -> Result<Draft, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO drafts (title, content, topic, tone, length, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DRAFT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DraftRow>(&sql)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.topic)
            .bind(fields.tone.map(Tone::as_str))
            .bind(fields.length.map(Length::as_str))
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_draft_db_error)?;

        map_row_to_draft(row)
    }

    async fn get_draft_owned(
        &self,
        id: i64,
        author_id: i64,
    ) -> Result<Option<Draft>, DomainError> {
        let sql = format!(
            r#"
            SELECT {DRAFT_COLUMNS}
            FROM drafts
            WHERE id = $1 AND author_id = $2
            "#
        );
        let row = sqlx::query_as::<_, DraftRow>(&sql)
            .bind(id)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_draft_db_error)?;

        row.map(map_row_to_draft).transpose()
    }

    async fn list_drafts(&self, author_id: i64, order: Recency) -> Result<Vec<Draft>, DomainError> {
        let direction = match order {
            Recency::NewestFirst => "DESC",
            Recency::OldestFirst => "ASC",
        };
        let sql = format!(
            r#"
            SELECT {DRAFT_COLUMNS}
            FROM drafts
            WHERE author_id = $1
            ORDER BY updated_at {direction}, id {direction}
            "#
        );
        let rows = sqlx::query_as::<_, DraftRow>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_draft_db_error)?;

        rows.into_iter().map(map_row_to_draft).collect()
    }

    async fn update_draft_owned(
        &self,
        id: i64,
        author_id: i64,
        fields: DraftFields,
    ) -> Result<Option<Draft>, DomainError> {
        let sql = format!(
            r#"
            UPDATE drafts
            SET title = $3,
                content = $4,
                topic = $5,
                tone = $6,
                length = $7,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING {DRAFT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DraftRow>(&sql)
            .bind(id)
            .bind(author_id)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.topic)
            .bind(fields.tone.map(Tone::as_str))
            .bind(fields.length.map(Length::as_str))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_draft_db_error)?;

        row.map(map_row_to_draft).transpose()
    }

    async fn delete_draft_owned(&self, id: i64, author_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drafts
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(id)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(map_draft_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_draft(row: DraftRow) -> Result<Draft, DomainError> {
    let tone = row.tone.as_deref().map(str::parse::<Tone>).transpose();
    let length = row.length.as_deref().map(str::parse::<Length>).transpose();
    let (tone, length) = match (tone, length) {
        (Ok(tone), Ok(length)) => (tone, length),
        (Err(err), _) | (_, Err(err)) => return Err(DomainError::Unexpected(err.to_string())),
    };

    let fields = DraftFields {
        title: row.title,
        content: row.content,
        topic: row.topic,
        tone,
        length,
    };
    Draft::new(row.id, row.author_id, fields, row.created_at, row.updated_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_draft_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
