use std::sync::LazyLock;

use regex::Regex;

use crate::application::fallback_content::fallback_article;
use crate::domain::error::DomainError;
use crate::domain::generation::{GeneratedArticle, GenerationRequest};
use crate::domain::markdown::html_to_text;
use crate::infrastructure::completion_client::{
    CompletionBackend, CompletionError, CompletionRequest,
};

const WRITER_ROLE: &str = "You are a professional content writer who creates engaging, informative blog posts. Always respond with properly formatted HTML content.";
const SUMMARIZER_ROLE: &str =
    "You are a content summarizer. Create a brief 2-3 sentence summary of the given content.";

static H1_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>(.*?)</h1>").expect("h1 pattern must compile"));

/// Генерация статьи через бэкенд дополнения текста. Без бэкенда
/// и при любой его ошибке возвращается шаблонная статья.
pub(crate) struct GenerationService<B: CompletionBackend> {
    backend: Option<B>,
}

impl<B: CompletionBackend> GenerationService<B> {
    pub(crate) fn new(backend: Option<B>) -> Self {
        Self { backend }
    }

    pub(crate) async fn generate(
        &self,
        req: GenerationRequest,
    ) -> Result<GeneratedArticle, DomainError> {
        let req = req.validate()?;

        let Some(backend) = &self.backend else {
            tracing::warn!("completion backend is not configured, using fallback content");
            return Ok(fallback_article(&req));
        };

        match Self::generate_with(backend, &req).await {
            Ok(article) => Ok(article),
            Err(err) => {
                tracing::warn!(
                    category = err.category(),
                    error = %err,
                    "completion failed, using fallback content"
                );
                Ok(fallback_article(&req))
            }
        }
    }

    async fn generate_with(
        backend: &B,
        req: &GenerationRequest,
    ) -> Result<GeneratedArticle, CompletionError> {
        let content = backend
            .complete(CompletionRequest {
                system: WRITER_ROLE.to_string(),
                user: build_article_prompt(req),
                max_tokens: 4000,
                temperature: 0.7,
            })
            .await?;

        let title = extract_title(&content).unwrap_or_else(|| req.title.clone());

        let plain = html_to_text(&content);
        let summary = backend
            .complete(CompletionRequest {
                system: SUMMARIZER_ROLE.to_string(),
                user: format!("Summarize this blog post in 2-3 sentences: {plain}"),
                max_tokens: 150,
                temperature: 0.3,
            })
            .await?;

        Ok(GeneratedArticle {
            content,
            title,
            summary,
            is_fallback: false,
        })
    }
}

pub(crate) fn build_article_prompt(req: &GenerationRequest) -> String {
    let topic_line = req
        .topic
        .as_deref()
        .map(|topic| format!("Topic: {topic}"))
        .unwrap_or_default();

    format!(
        "Write a professional blog post with the following requirements:

Title: {title}
{topic_line}
Tone: {tone}
Length: {words} words

Please write a well-structured blog post that includes:
1. An engaging introduction
2. Clear section headings (use H2 tags)
3. Informative and engaging content
4. A conclusion that summarizes key points
5. Proper formatting with paragraphs, lists, and emphasis where appropriate

Format the response in HTML with proper tags like <h1>, <h2>, <h3>, <p>, <ul>, <li>, <strong>, <em>, etc.

Make sure the content is original, informative, and provides value to readers.",
        title = req.title,
        tone = req.tone,
        words = req.length.word_range(),
    )
}

fn extract_title(content: &str) -> Option<String> {
    H1_TITLE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
