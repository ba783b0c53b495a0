use chrono::{DateTime, Utc};

use super::error::DomainError;

pub(crate) const MIN_RATING: i16 = 1;
pub(crate) const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rating {
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) value: i16,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Оценка, прошедшая проверку диапазона `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RatingValue(i16);

impl RatingValue {
    pub(crate) fn new(value: i64) -> Result<Self, DomainError> {
        if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            return Err(DomainError::validation("value", "must be 1..5"));
        }
        Ok(Self(value as i16))
    }

    pub(crate) fn get(self) -> i16 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RatingSummary {
    pub(crate) average: f64,
    pub(crate) count: usize,
    pub(crate) user_rating: Option<i16>,
}

impl RatingSummary {
    /// Среднее и количество оценок поста; `user_rating` заполняется,
    /// только если запрос пришёл от аутентифицированного пользователя.
    pub(crate) fn from_ratings(ratings: &[Rating], viewer_id: Option<i64>) -> Self {
        let count = ratings.len();
        let average = if count == 0 {
            0.0
        } else {
            let sum: i64 = ratings.iter().map(|r| i64::from(r.value)).sum();
            sum as f64 / count as f64
        };
        let user_rating = viewer_id.and_then(|viewer| {
            ratings
                .iter()
                .find(|r| r.user_id == viewer)
                .map(|r| r.value)
        });

        Self {
            average,
            count,
            user_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Rating, RatingSummary, RatingValue};

    fn rating(user_id: i64, value: i16) -> Rating {
        let now = Utc::now();
        Rating {
            user_id,
            post_id: 1,
            value,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn rating_value_accepts_only_one_to_five() {
        assert!(RatingValue::new(0).is_err());
        assert!(RatingValue::new(6).is_err());
        assert!(RatingValue::new(-3).is_err());
        assert_eq!(RatingValue::new(1).expect("valid").get(), 1);
        assert_eq!(RatingValue::new(5).expect("valid").get(), 5);
    }

    #[test]
    fn summary_of_three_and_five_is_four() {
        let summary = RatingSummary::from_ratings(&[rating(1, 3), rating(2, 5)], None);
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.user_rating, None);
    }

    #[test]
    fn summary_without_ratings_is_zero() {
        let summary = RatingSummary::from_ratings(&[], Some(1));
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.user_rating, None);
    }

    #[test]
    fn summary_reports_viewer_rating() {
        let summary = RatingSummary::from_ratings(&[rating(1, 2), rating(9, 4)], Some(9));
        assert_eq!(summary.user_rating, Some(4));
    }
}
