use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email.
    pub email: String,
    /// Дата и время создания пользователя (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// Данные пользователя.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Черновик статьи.
pub struct Draft {
    /// Идентификатор черновика.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// HTML-содержимое.
    pub content: String,
    /// Тема генерации, если задавалась.
    pub topic: Option<String>,
    /// Тон генерации.
    pub tone: Option<String>,
    /// Длина генерации.
    pub length: Option<String>,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего изменения (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Список черновиков текущего пользователя.
pub struct DraftList {
    /// Черновики в запрошенном порядке.
    pub drafts: Vec<Draft>,
    /// Количество черновиков.
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Поля черновика для создания или изменения.
pub struct DraftInput {
    /// Заголовок.
    pub title: String,
    /// HTML-содержимое.
    pub content: String,
    /// Тема.
    pub topic: Option<String>,
    /// `professional | casual | academic | conversational`.
    pub tone: Option<String>,
    /// `short | medium | long`.
    pub length: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Краткое описание.
    pub summary: Option<String>,
    /// Уникальный slug.
    pub slug: String,
    /// Опубликован ли пост.
    pub published: bool,
    /// Момент публикации (UTC).
    pub published_at: Option<DateTime<Utc>>,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Опубликованный пост в ленте вместе с автором и рейтингом.
pub struct PublishedPost {
    /// Сам пост.
    #[serde(flatten)]
    pub post: Post,
    /// Логин автора.
    pub author_username: String,
    /// Средняя оценка, `0` без оценок.
    pub average_rating: f64,
    /// Количество оценок.
    pub rating_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Лента опубликованных постов.
pub struct PostList {
    /// Посты в запрошенном порядке.
    pub posts: Vec<PublishedPost>,
    /// Количество постов.
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Данные нового поста.
pub struct NewPost {
    /// Заголовок.
    pub title: String,
    /// Содержимое.
    pub content: String,
    /// Краткое описание; по умолчанию начало содержимого.
    pub summary: Option<String>,
    /// Slug; по умолчанию выводится из заголовка.
    pub slug: Option<String>,
    /// Опубликовать сразу.
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Изменение существующего поста.
pub struct PostUpdate {
    /// Заголовок.
    pub title: String,
    /// Содержимое.
    pub content: String,
    /// Краткое описание.
    pub summary: Option<String>,
    /// Признак публикации.
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Оценка поста пользователем.
pub struct Rating {
    /// Кто оценил.
    pub user_id: i64,
    /// Что оценено.
    pub post_id: i64,
    /// Значение от 1 до 5.
    pub value: i16,
    /// Первая оценка (UTC).
    pub created_at: DateTime<Utc>,
    /// Последнее изменение (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Сводка оценок поста.
pub struct RatingSummary {
    /// Среднее значение.
    pub average: f64,
    /// Количество оценок.
    pub count: usize,
    /// Оценка текущего пользователя, если запрос был с токеном.
    pub user_rating: Option<i16>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Параметры генерации статьи.
pub struct GenerateInput {
    /// Заголовок статьи.
    pub title: String,
    /// Тема; по умолчанию заголовок.
    pub topic: Option<String>,
    /// Тон.
    pub tone: Option<String>,
    /// Длина.
    pub length: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Результат генерации.
pub struct GeneratedArticle {
    /// HTML статьи.
    pub content: String,
    /// Заголовок.
    pub title: String,
    /// Краткое описание.
    pub summary: String,
    /// `true`, если вернулся шаблон вместо ответа модели.
    #[serde(rename = "isFallback")]
    pub is_fallback: bool,
}

#[derive(Debug, Clone)]
/// Выгруженный черновик.
pub struct ExportedDraft {
    /// Имя файла из `Content-Disposition`.
    pub filename: String,
    /// Содержимое файла.
    pub body: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Порядок выдачи списков.
pub enum SortOrder {
    /// Сначала новые.
    #[default]
    Latest,
    /// Сначала старые.
    Earliest,
    /// По средней оценке.
    HighestRated,
}

impl SortOrder {
    /// Значение query-параметра `sort`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Earliest => "earliest",
            Self::HighestRated => "highest-rated",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Формат выгрузки черновика.
pub enum ExportFormat {
    /// Markdown-файл.
    #[default]
    Markdown,
    /// Простой текст.
    Text,
}

impl ExportFormat {
    /// Значение query-параметра `format`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }
}
