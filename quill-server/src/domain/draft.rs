use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::generation::{Length, Tone};
use super::post::{normalize_content, normalize_title};

#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) tone: Option<Tone>,
    pub(crate) length: Option<Length>,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Поля черновика, которые задаёт пользователь при создании и обновлении.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DraftFields {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) topic: Option<String>,
    pub(crate) tone: Option<Tone>,
    pub(crate) length: Option<Length>,
}

impl DraftFields {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let topic = self
            .topic
            .map(|topic| topic.trim().to_string())
            .filter(|topic| !topic.is_empty());

        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            topic,
            tone: self.tone,
            length: self.length,
        })
    }
}

impl Draft {
    pub(crate) fn new(
        id: i64,
        author_id: i64,
        fields: DraftFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::validation("id", "must be > 0"));
        }
        if author_id <= 0 {
            return Err(DomainError::validation("author_id", "must be > 0"));
        }
        if updated_at < created_at {
            return Err(DomainError::validation("updated_at", "must be >= created_at"));
        }
        let fields = fields.validate()?;

        Ok(Self {
            id,
            title: fields.title,
            content: fields.content,
            topic: fields.topic,
            tone: fields.tone,
            length: fields.length,
            author_id,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Draft, DraftFields};
    use crate::domain::error::DomainError;
    use crate::domain::generation::Tone;

    fn fields(title: &str, content: &str) -> DraftFields {
        DraftFields {
            title: title.to_string(),
            content: content.to_string(),
            topic: Some("  ".to_string()),
            tone: Some(Tone::Academic),
            length: None,
        }
    }

    #[test]
    fn fields_validate_trims_and_drops_blank_topic() {
        let validated = fields("  Draft  ", " <p>body</p> ")
            .validate()
            .expect("must validate");
        assert_eq!(validated.title, "Draft");
        assert_eq!(validated.content, "<p>body</p>");
        assert_eq!(validated.topic, None);
        assert_eq!(validated.tone, Some(Tone::Academic));
    }

    #[test]
    fn fields_validate_requires_title_and_content() {
        let err = fields("", "body").validate().expect_err("title required");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));

        let err = fields("title", " ").validate().expect_err("content required");
        assert!(matches!(err, DomainError::Validation { field: "content", .. }));
    }

    #[test]
    fn draft_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(5);
        let err = Draft::new(1, 2, fields("t", "c"), created_at, updated_at)
            .expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { field: "updated_at", .. }));
    }
}
