use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::rating_repository::RatingRepository;
use crate::domain::error::DomainError;
use crate::domain::rating::{Rating, RatingValue};

#[derive(Debug, Clone)]
pub(crate) struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    user_id: i64,
    post_id: i64,
    value: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            user_id: row.user_id,
            post_id: row.post_id,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert_rating(
        &self,
        user_id: i64,
        post_id: i64,
        value: RatingValue,
    ) -> Result<Rating, DomainError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO ratings (user_id, post_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, post_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING user_id, post_id, value, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(value.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_rating_db_error(err, post_id))?;

        Ok(row.into())
    }

    async fn list_ratings(&self, post_id: i64) -> Result<Vec<Rating>, DomainError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT user_id, post_id, value, created_at, updated_at
            FROM ratings
            WHERE post_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_rating_db_error(err, post_id))?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }
}

fn map_rating_db_error(err: sqlx::Error, post_id: i64) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::not_found("post", post_id);
    }
    DomainError::Unexpected(err.to_string())
}
