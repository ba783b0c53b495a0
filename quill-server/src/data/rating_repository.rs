use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::rating::{Rating, RatingValue};

#[async_trait]
pub(crate) trait RatingRepository: Send + Sync {
    /// Одна оценка на пару (user, post): повторный вызов перезаписывает значение.
    async fn upsert_rating(
        &self,
        user_id: i64,
        post_id: i64,
        value: RatingValue,
    ) -> Result<Rating, DomainError>;
    async fn list_ratings(&self, post_id: i64) -> Result<Vec<Rating>, DomainError>;
}
