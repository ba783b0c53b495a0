use std::str::FromStr;

use super::error::DomainError;

/// Порядок выдачи списков черновиков и постов.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ListSort {
    #[default]
    Latest,
    Earliest,
    HighestRated,
}

/// Направление сортировки по времени, которое понимает хранилище.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recency {
    NewestFirst,
    OldestFirst,
}

impl ListSort {
    /// Черновики не оцениваются, поэтому `highest-rated` для них равен `latest`.
    /// Для постов рейтинг досортировывается поверх выборки `NewestFirst`.
    pub(crate) fn recency(self) -> Recency {
        match self {
            ListSort::Earliest => Recency::OldestFirst,
            ListSort::Latest | ListSort::HighestRated => Recency::NewestFirst,
        }
    }

    /// Пустой или отсутствующий параметр означает `latest`.
    pub(crate) fn parse_param(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for ListSort {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "latest" => Ok(ListSort::Latest),
            "earliest" => Ok(ListSort::Earliest),
            "highest-rated" => Ok(ListSort::HighestRated),
            _ => Err(DomainError::validation(
                "sort",
                "must be one of latest, earliest, highest-rated",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListSort, Recency};
    use crate::domain::error::DomainError;

    #[test]
    fn sort_parses_kebab_case_values() {
        assert_eq!("highest-rated".parse::<ListSort>().expect("valid"), ListSort::HighestRated);
        assert_eq!("earliest".parse::<ListSort>().expect("valid"), ListSort::Earliest);
        assert_eq!("latest".parse::<ListSort>().expect("valid"), ListSort::Latest);
    }

    #[test]
    fn missing_or_blank_param_is_latest() {
        assert_eq!(ListSort::parse_param(None).expect("valid"), ListSort::Latest);
        assert_eq!(ListSort::parse_param(Some(" ")).expect("valid"), ListSort::Latest);
    }

    #[test]
    fn unknown_sort_is_validation_error() {
        let err = ListSort::parse_param(Some("random")).expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { field: "sort", .. }));
    }

    #[test]
    fn highest_rated_reads_newest_first() {
        assert_eq!(ListSort::HighestRated.recency(), Recency::NewestFirst);
        assert_eq!(ListSort::Latest.recency(), Recency::NewestFirst);
        assert_eq!(ListSort::Earliest.recency(), Recency::OldestFirst);
    }
}
