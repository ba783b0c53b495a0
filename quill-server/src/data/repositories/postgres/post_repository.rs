use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::listing::Recency;
use crate::domain::post::{Post, PublishedPost};

const POST_COLUMNS: &str =
    "id, title, content, summary, slug, published_at, author_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    summary: Option<String>,
    slug: String,
    published_at: Option<DateTime<Utc>>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PublishedPostRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_username: String,
    average_rating: f64,
    rating_count: i64,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO posts (title, content, summary, slug, published, published_at, author_id)
            VALUES ($1, $2, $3, $4, $5, CASE WHEN $5 THEN NOW() END, $6)
            RETURNING {POST_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.summary)
            .bind(&input.slug)
            .bind(input.published)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE id = $1
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn list_published(&self, order: Recency) -> Result<Vec<PublishedPost>, DomainError> {
        let direction = match order {
            Recency::NewestFirst => "DESC",
            Recency::OldestFirst => "ASC",
        };
        let sql = format!(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.summary,
                p.slug,
                p.published_at,
                p.author_id,
                p.created_at,
                p.updated_at,
                u.username AS author_username,
                COALESCE(AVG(r.value)::FLOAT8, 0) AS average_rating,
                COUNT(r.id) AS rating_count
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN ratings r ON r.post_id = p.id
            WHERE p.published
            GROUP BY p.id, u.username
            ORDER BY p.published_at {direction}, p.id {direction}
            "#
        );
        let rows = sqlx::query_as::<_, PublishedPostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(PublishedPost {
                    post: map_row_to_post(row.post)?,
                    author_username: row.author_username,
                    average_rating: row.average_rating,
                    rating_count: row.rating_count,
                })
            })
            .collect()
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        // published_at выставляется при первой публикации и сбрасывается при снятии
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $3,
                content = $4,
                summary = $5,
                published = $6,
                published_at = CASE
                    WHEN NOT $6 THEN NULL
                    ELSE COALESCE(published_at, NOW())
                END,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING {POST_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id)
            .bind(owner_id)
            .bind(&patch.title)
            .bind(&patch.content)
            .bind(&patch.summary)
            .bind(patch.published)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post_owned(&self, post_id: i64, owner_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.summary,
        row.slug,
        row.published_at,
        row.author_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23503") => return DomainError::NotFound("author".to_string()),
            Some("23505") if db_err.constraint() == Some("posts_slug_key") => {
                return DomainError::AlreadyExists("slug".to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}
