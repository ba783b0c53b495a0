use reqwest::{Client, Method, RequestBuilder, header};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{QuillClientError, QuillClientResult};
use crate::models::{
    AuthResponse, Draft, DraftInput, DraftList, ExportFormat, ExportedDraft, GenerateInput,
    GeneratedArticle, NewPost, Post, PostList, PostUpdate, Rating, RatingSummary, SortOrder,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SaveDraftRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(flatten)]
    draft: &'a DraftInput,
}

#[derive(Debug, Serialize)]
struct RateRequestDto {
    value: i64,
}

#[derive(Debug, Serialize)]
struct SortQuery {
    sort: &'static str,
}

#[derive(Debug, Serialize)]
struct ExportQuery {
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `quill-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> QuillClientResult<Self> {
        // генерация может идти до минуты на стороне сервера
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> QuillClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        QuillClientError::from_http_status(status, Some(message))
    }

    async fn send(request: RequestBuilder) -> QuillClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(QuillClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<TRes: DeserializeOwned>(request: RequestBuilder) -> QuillClientResult<TRes> {
        Self::send(request)
            .await?
            .json::<TRes>()
            .await
            .map_err(QuillClientError::from_reqwest)
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> QuillClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        Self::fetch(self.request(method, path, token).json(body)).await
    }

    /// Регистрирует пользователя и возвращает JWT + данные пользователя.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> QuillClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        self.send_json(Method::POST, "/api/auth/register", &payload, None)
            .await
    }

    /// Выполняет вход пользователя и возвращает JWT + данные пользователя.
    pub async fn login(&self, username: &str, password: &str) -> QuillClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        self.send_json(Method::POST, "/api/auth/login", &payload, None)
            .await
    }

    /// Черновики владельца токена.
    pub async fn list_drafts(&self, token: &str, sort: SortOrder) -> QuillClientResult<DraftList> {
        let query = SortQuery {
            sort: sort.as_str(),
        };
        Self::fetch(
            self.request(Method::GET, "/api/drafts", Some(token))
                .query(&query),
        )
        .await
    }

    /// Черновик по идентификатору.
    pub async fn get_draft(&self, token: &str, id: i64) -> QuillClientResult<Draft> {
        Self::fetch(self.request(Method::GET, &format!("/api/drafts/{id}"), Some(token))).await
    }

    /// Создаёт черновик или, если передан `id`, обновляет существующий.
    pub async fn save_draft(
        &self,
        token: &str,
        id: Option<i64>,
        draft: &DraftInput,
    ) -> QuillClientResult<Draft> {
        let payload = SaveDraftRequestDto { id, draft };
        self.send_json(Method::POST, "/api/drafts", &payload, Some(token))
            .await
    }

    /// Изменяет черновик.
    pub async fn update_draft(
        &self,
        token: &str,
        id: i64,
        draft: &DraftInput,
    ) -> QuillClientResult<Draft> {
        self.send_json(
            Method::PUT,
            &format!("/api/drafts/{id}"),
            draft,
            Some(token),
        )
        .await
    }

    /// Удаляет черновик.
    pub async fn delete_draft(&self, token: &str, id: i64) -> QuillClientResult<()> {
        let _: IgnoredAny = Self::fetch(self.request(
            Method::DELETE,
            &format!("/api/drafts/{id}"),
            Some(token),
        ))
        .await?;
        Ok(())
    }

    /// Публикует черновик как новый пост.
    pub async fn publish_draft(&self, token: &str, id: i64) -> QuillClientResult<Post> {
        Self::fetch(self.request(
            Method::POST,
            &format!("/api/drafts/{id}/publish"),
            Some(token),
        ))
        .await
    }

    /// Выгружает черновик в файл выбранного формата.
    pub async fn export_draft(
        &self,
        token: &str,
        id: i64,
        format: ExportFormat,
    ) -> QuillClientResult<ExportedDraft> {
        let query = ExportQuery {
            format: format.as_str(),
        };
        let response = Self::send(
            self.request(Method::GET, &format!("/api/drafts/{id}/export"), Some(token))
                .query(&query),
        )
        .await?;

        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format!("draft-{id}.{}", default_extension(format)));
        let body = response
            .text()
            .await
            .map_err(QuillClientError::from_reqwest)?;

        Ok(ExportedDraft { filename, body })
    }

    /// Лента опубликованных постов.
    pub async fn list_posts(&self, sort: SortOrder) -> QuillClientResult<PostList> {
        let query = SortQuery {
            sort: sort.as_str(),
        };
        Self::fetch(self.request(Method::GET, "/api/posts", None).query(&query)).await
    }

    /// Опубликованный пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> QuillClientResult<Post> {
        Self::fetch(self.request(Method::GET, &format!("/api/posts/{id}"), None)).await
    }

    /// Создаёт пост от имени авторизованного пользователя.
    pub async fn create_post(&self, token: &str, post: &NewPost) -> QuillClientResult<Post> {
        self.send_json(Method::POST, "/api/posts", post, Some(token))
            .await
    }

    /// Обновляет пост по идентификатору.
    pub async fn update_post(
        &self,
        token: &str,
        id: i64,
        update: &PostUpdate,
    ) -> QuillClientResult<Post> {
        self.send_json(
            Method::PUT,
            &format!("/api/posts/{id}"),
            update,
            Some(token),
        )
        .await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, token: &str, id: i64) -> QuillClientResult<()> {
        let _: IgnoredAny = Self::fetch(self.request(
            Method::DELETE,
            &format!("/api/posts/{id}"),
            Some(token),
        ))
        .await?;
        Ok(())
    }

    /// Ставит или меняет оценку поста.
    pub async fn rate_post(&self, token: &str, id: i64, value: i64) -> QuillClientResult<Rating> {
        self.send_json(
            Method::PUT,
            &format!("/api/posts/{id}/rating"),
            &RateRequestDto { value },
            Some(token),
        )
        .await
    }

    /// Сводка оценок; с токеном в ней есть оценка текущего пользователя.
    pub async fn post_ratings(
        &self,
        token: Option<&str>,
        id: i64,
    ) -> QuillClientResult<RatingSummary> {
        Self::fetch(self.request(Method::GET, &format!("/api/posts/{id}/ratings"), token)).await
    }

    /// Генерирует статью.
    pub async fn generate(
        &self,
        token: &str,
        input: &GenerateInput,
    ) -> QuillClientResult<GeneratedArticle> {
        self.send_json(Method::POST, "/api/generate", input, Some(token))
            .await
    }
}

fn default_extension(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Markdown => "md",
        ExportFormat::Text => "txt",
    }
}

/// Достаёт имя файла из `attachment; filename="..."`.
fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn filename_is_taken_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"hello-world.md\""),
            Some("hello-world.md".to_string())
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }

    #[test]
    fn save_draft_payload_flattens_fields_and_skips_missing_id() {
        let draft = DraftInput {
            title: "T".to_string(),
            content: "<p>c</p>".to_string(),
            tone: Some("casual".to_string()),
            ..DraftInput::default()
        };

        let created = serde_json::to_value(SaveDraftRequestDto {
            id: None,
            draft: &draft,
        })
        .expect("serialize");
        assert_eq!(created.get("id"), None);
        assert_eq!(created["title"], "T");
        assert_eq!(created["tone"], "casual");

        let updated = serde_json::to_value(SaveDraftRequestDto {
            id: Some(3),
            draft: &draft,
        })
        .expect("serialize");
        assert_eq!(updated["id"], 3);
    }

    #[test]
    fn generated_article_reads_camel_case_fallback_flag() {
        let raw = r#"{"content":"<h1>T</h1>","title":"T","summary":"s","isFallback":true}"#;
        let article: GeneratedArticle = serde_json::from_str(raw).expect("parse");
        assert!(article.is_fallback);
        assert_eq!(article.title, "T");
    }

    #[test]
    fn published_post_reads_flattened_listing() {
        let raw = r#"{
            "id": 1, "title": "t", "content": "c", "summary": null, "slug": "t",
            "published": true, "published_at": "2026-01-01T00:00:00Z", "author_id": 2,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z",
            "author_username": "alice", "average_rating": 4.5, "rating_count": 2
        }"#;

        let listed: crate::models::PublishedPost = serde_json::from_str(raw).expect("parse");
        assert_eq!(listed.post.slug, "t");
        assert_eq!(listed.author_username, "alice");
        assert_eq!(listed.rating_count, 2);
    }
}
