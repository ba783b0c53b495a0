use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompletionRequest {
    pub(crate) system: String,
    pub(crate) user: String,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
}

/// Классы отказа бэкенда. Определяются по HTTP-статусу и полям
/// `error.code` / `error.type` тела ответа.
#[derive(Debug, Error)]
pub(crate) enum CompletionError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("completion backend error: {0}")]
    Backend(String),

    #[error("completion transport error")]
    Transport(#[source] reqwest::Error),
}

impl CompletionError {
    pub(crate) fn category(&self) -> &'static str {
        match self {
            CompletionError::ModelUnavailable(_) => "model_unavailable",
            CompletionError::QuotaExceeded(_) => "quota_exceeded",
            CompletionError::InvalidCredentials(_) => "invalid_credentials",
            CompletionError::Backend(_) | CompletionError::Transport(_) => "other",
        }
    }
}

#[async_trait]
pub(crate) trait CompletionBackend: Send + Sync {
    /// Возвращает текст первого варианта ответа; пустая строка, если его нет.
    async fn complete(&self, req: CompletionRequest) -> Result<String, CompletionError>;
}

/// Клиент OpenAI-совместимого `/chat/completions`.
#[derive(Debug, Clone)]
pub(crate) struct OpenAiCompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
}

impl OpenAiCompletionClient {
    pub(crate) fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletionClient {
    async fn complete(&self, req: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &req.system,
                },
                ChatMessage {
                    role: "user",
                    content: &req.user,
                },
            ],
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &raw));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(CompletionError::Transport)?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}

pub(crate) fn classify_failure(status: StatusCode, raw_body: &str) -> CompletionError {
    let body = serde_json::from_str::<ApiErrorEnvelope>(raw_body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_default();
    let code = body.code.as_deref().unwrap_or_default();
    let kind = body.kind.as_deref().unwrap_or_default();
    let message = body
        .message
        .clone()
        .unwrap_or_else(|| format!("http status {status}"));

    if code == "model_not_found" || status == StatusCode::NOT_FOUND {
        return CompletionError::ModelUnavailable(message);
    }
    if code == "insufficient_quota"
        || kind == "insufficient_quota"
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        return CompletionError::QuotaExceeded(message);
    }
    if code == "invalid_api_key"
        || kind == "authentication_error"
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        return CompletionError::InvalidCredentials(message);
    }
    CompletionError::Backend(message)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{CompletionError, classify_failure};

    #[test]
    fn model_not_found_code_is_model_unavailable() {
        let body = r#"{"error":{"message":"The model `x` does not exist","type":"invalid_request_error","code":"model_not_found"}}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, CompletionError::ModelUnavailable(ref m) if m.contains("does not exist")));
        assert_eq!(err.category(), "model_unavailable");
    }

    #[test]
    fn insufficient_quota_and_429_are_quota_exceeded() {
        let body = r#"{"error":{"message":"quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, body),
            CompletionError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, ""),
            CompletionError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn invalid_key_is_invalid_credentials() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = classify_failure(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, CompletionError::InvalidCredentials(_)));
    }

    #[test]
    fn unknown_failure_is_other() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, CompletionError::Backend(ref m) if m.contains("500")));
        assert_eq!(err.category(), "other");
    }

    #[test]
    fn message_substrings_do_not_drive_classification() {
        let body = r#"{"error":{"message":"quota model_not_found invalid_api_key","type":"server_error","code":null}}"#;
        let err = classify_failure(StatusCode::BAD_GATEWAY, body);
        assert!(matches!(err, CompletionError::Backend(_)));
    }
}
