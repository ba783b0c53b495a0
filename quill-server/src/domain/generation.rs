use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Tone {
    #[default]
    Professional,
    Casual,
    Academic,
    Conversational,
}

impl Tone {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Academic => "academic",
            Tone::Conversational => "conversational",
        }
    }

    /// Описание стиля, которое подставляется во вступление шаблонной статьи.
    pub(crate) fn style_phrase(self) -> &'static str {
        match self {
            Tone::Professional => "professional and authoritative",
            Tone::Casual => "friendly and conversational",
            Tone::Academic => "scholarly and research-based",
            Tone::Conversational => "engaging and approachable",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "academic" => Ok(Tone::Academic),
            "conversational" => Ok(Tone::Conversational),
            _ => Err(DomainError::validation(
                "tone",
                "must be one of professional, casual, academic, conversational",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    pub(crate) fn word_range(self) -> &'static str {
        match self {
            Length::Short => "800-1200",
            Length::Medium => "1500-2000",
            Length::Long => "2500-3500",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Length {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            _ => Err(DomainError::validation(
                "length",
                "must be one of short, medium, long",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenerationRequest {
    pub(crate) title: String,
    pub(crate) topic: Option<String>,
    pub(crate) tone: Tone,
    pub(crate) length: Length,
}

impl GenerationRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title", "blog title is required"));
        }
        let topic = self
            .topic
            .map(|topic| topic.trim().to_string())
            .filter(|topic| !topic.is_empty());

        Ok(Self {
            title: title.to_string(),
            topic,
            tone: self.tone,
            length: self.length,
        })
    }

    /// Тема статьи; без явной темы используется заголовок в нижнем регистре.
    pub(crate) fn subject(&self) -> String {
        match &self.topic {
            Some(topic) => topic.clone(),
            None => self.title.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeneratedArticle {
    pub(crate) content: String,
    pub(crate) title: String,
    pub(crate) summary: String,
    pub(crate) is_fallback: bool,
}
