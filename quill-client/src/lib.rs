//! Клиентская библиотека для работы с quill-server по HTTP.
//!
//! Клиент хранит JWT-токен после `register`/`login` и автоматически использует
//! его в защищённых операциях.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{QuillClientError, QuillClientResult};
pub use models::{
    AuthResponse, Draft, DraftInput, DraftList, ExportFormat, ExportedDraft, GenerateInput,
    GeneratedArticle, NewPost, Post, PostList, PostUpdate, PublishedPost, Rating, RatingSummary,
    SortOrder, User,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент API черновиков, постов, оценок и генерации статей.
pub struct QuillClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl QuillClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> QuillClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> QuillClientResult<AuthResponse> {
        let result = self.http_client.register(username, email, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Выполняет вход пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, username: &str, password: &str) -> QuillClientResult<AuthResponse> {
        let result = self.http_client.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Черновики текущего пользователя. Требует JWT-токен.
    pub async fn list_drafts(&self, sort: SortOrder) -> QuillClientResult<DraftList> {
        self.http_client.list_drafts(self.require_token()?, sort).await
    }

    /// Черновик по идентификатору. Требует JWT-токен.
    pub async fn get_draft(&self, id: i64) -> QuillClientResult<Draft> {
        self.http_client.get_draft(self.require_token()?, id).await
    }

    /// Создаёт черновик, а с `id` обновляет существующий. Требует JWT-токен.
    pub async fn save_draft(&self, id: Option<i64>, draft: &DraftInput) -> QuillClientResult<Draft> {
        self.http_client
            .save_draft(self.require_token()?, id, draft)
            .await
    }

    /// Изменяет черновик. Требует JWT-токен.
    pub async fn update_draft(&self, id: i64, draft: &DraftInput) -> QuillClientResult<Draft> {
        self.http_client
            .update_draft(self.require_token()?, id, draft)
            .await
    }

    /// Удаляет черновик. Требует JWT-токен.
    pub async fn delete_draft(&self, id: i64) -> QuillClientResult<()> {
        self.http_client.delete_draft(self.require_token()?, id).await
    }

    /// Публикует черновик как новый пост. Требует JWT-токен.
    pub async fn publish_draft(&self, id: i64) -> QuillClientResult<Post> {
        self.http_client.publish_draft(self.require_token()?, id).await
    }

    /// Выгружает черновик в Markdown или текст. Требует JWT-токен.
    pub async fn export_draft(
        &self,
        id: i64,
        format: ExportFormat,
    ) -> QuillClientResult<ExportedDraft> {
        self.http_client
            .export_draft(self.require_token()?, id, format)
            .await
    }

    /// Лента опубликованных постов.
    pub async fn list_posts(&self, sort: SortOrder) -> QuillClientResult<PostList> {
        self.http_client.list_posts(sort).await
    }

    /// Опубликованный пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> QuillClientResult<Post> {
        self.http_client.get_post(id).await
    }

    /// Создаёт новый пост. Требует JWT-токен.
    pub async fn create_post(&self, post: &NewPost) -> QuillClientResult<Post> {
        self.http_client.create_post(self.require_token()?, post).await
    }

    /// Обновляет пост по идентификатору. Требует JWT-токен.
    pub async fn update_post(&self, id: i64, update: &PostUpdate) -> QuillClientResult<Post> {
        self.http_client
            .update_post(self.require_token()?, id, update)
            .await
    }

    /// Удаляет пост по идентификатору. Требует JWT-токен.
    pub async fn delete_post(&self, id: i64) -> QuillClientResult<()> {
        self.http_client.delete_post(self.require_token()?, id).await
    }

    /// Ставит оценку от 1 до 5. Требует JWT-токен.
    pub async fn rate_post(&self, id: i64, value: i64) -> QuillClientResult<Rating> {
        self.http_client
            .rate_post(self.require_token()?, id, value)
            .await
    }

    /// Сводка оценок поста. Токен необязателен.
    pub async fn post_ratings(&self, id: i64) -> QuillClientResult<RatingSummary> {
        self.http_client.post_ratings(self.get_token(), id).await
    }

    /// Генерирует статью. Требует JWT-токен.
    pub async fn generate(&self, input: &GenerateInput) -> QuillClientResult<GeneratedArticle> {
        self.http_client.generate(self.require_token()?, input).await
    }

    fn require_token(&self) -> QuillClientResult<&str> {
        self.token.as_deref().ok_or(QuillClientError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftInput, QuillClient, QuillClientError};

    #[tokio::test]
    async fn protected_calls_fail_fast_without_token() {
        let client = QuillClient::new("http://127.0.0.1:1").expect("client");

        let err = client
            .save_draft(None, &DraftInput::default())
            .await
            .expect_err("must require token");
        assert!(matches!(err, QuillClientError::Unauthorized));
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mut client = QuillClient::new("http://127.0.0.1:1").expect("client");
        assert!(client.get_token().is_none());

        client.set_token("abc");
        assert_eq!(client.get_token(), Some("abc"));

        client.clear_token();
        assert!(client.get_token().is_none());
    }
}
