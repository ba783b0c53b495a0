use crate::data::rating_repository::RatingRepository;
use crate::domain::error::DomainError;
use crate::domain::rating::{Rating, RatingSummary, RatingValue};

pub(crate) struct RatingService<R: RatingRepository> {
    repo: R,
}

impl<R: RatingRepository> RatingService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Повторная оценка того же поста перезаписывает предыдущую.
    pub(crate) async fn rate(
        &self,
        user_id: i64,
        post_id: i64,
        value: i64,
    ) -> Result<Rating, DomainError> {
        let value = RatingValue::new(value)?;
        self.repo.upsert_rating(user_id, post_id, value).await
    }

    /// Для поста без оценок (в том числе несуществующего) возвращает нули.
    pub(crate) async fn summary(
        &self,
        post_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<RatingSummary, DomainError> {
        let ratings = self.repo.list_ratings(post_id).await?;
        Ok(RatingSummary::from_ratings(&ratings, viewer_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::RatingService;
    use crate::data::rating_repository::RatingRepository;
    use crate::domain::error::DomainError;
    use crate::domain::rating::{Rating, RatingValue};

    #[derive(Clone, Default)]
    struct InMemoryRatings {
        ratings: Arc<Mutex<Vec<Rating>>>,
        known_posts: Vec<i64>,
    }

    #[async_trait]
    impl RatingRepository for InMemoryRatings {
        async fn upsert_rating(
            &self,
            user_id: i64,
            post_id: i64,
            value: RatingValue,
        ) -> Result<Rating, DomainError> {
            if !self.known_posts.contains(&post_id) {
                return Err(DomainError::not_found("post", post_id));
            }
            let mut ratings = self.ratings.lock().expect("ratings mutex poisoned");
            let now = Utc::now();
            if let Some(existing) = ratings
                .iter_mut()
                .find(|r| r.user_id == user_id && r.post_id == post_id)
            {
                existing.value = value.get();
                existing.updated_at = now;
                return Ok(existing.clone());
            }
            let rating = Rating {
                user_id,
                post_id,
                value: value.get(),
                created_at: now,
                updated_at: now,
            };
            ratings.push(rating.clone());
            Ok(rating)
        }

        async fn list_ratings(&self, post_id: i64) -> Result<Vec<Rating>, DomainError> {
            Ok(self
                .ratings
                .lock()
                .expect("ratings mutex poisoned")
                .iter()
                .filter(|r| r.post_id == post_id)
                .cloned()
                .collect())
        }
    }

    fn service() -> RatingService<InMemoryRatings> {
        RatingService::new(InMemoryRatings {
            known_posts: vec![10, 20],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn rating_twice_keeps_single_latest_value() {
        let service = service();
        service.rate(1, 10, 2).await.expect("first rating");
        let latest = service.rate(1, 10, 5).await.expect("second rating");
        assert_eq!(latest.value, 5);

        let summary = service.summary(10, Some(1)).await.expect("summary");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 5.0);
        assert_eq!(summary.user_rating, Some(5));
    }

    #[tokio::test]
    async fn average_of_three_and_five_is_four() {
        let service = service();
        service.rate(1, 20, 3).await.expect("rating");
        service.rate(2, 20, 5).await.expect("rating");

        let summary = service.summary(20, None).await.expect("summary");
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.user_rating, None);
    }

    #[tokio::test]
    async fn out_of_range_value_is_rejected() {
        let service = service();
        for value in [0, 6, -1] {
            let err = service.rate(1, 10, value).await.expect_err("must fail");
            assert!(matches!(err, DomainError::Validation { field: "value", .. }));
        }
    }

    #[tokio::test]
    async fn rating_unknown_post_is_not_found() {
        let err = service().rate(1, 99, 4).await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_post_summary_is_zero() {
        let summary = service().summary(99, Some(1)).await.expect("summary");
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.user_rating, None);
    }
}
