use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `quill-client`.
pub enum QuillClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден или принадлежит другому пользователю.
    #[error("not found")]
    NotFound,

    /// Конфликт уникальности: логин, email или slug уже заняты.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Некорректный запрос или ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `quill-client`.
pub type QuillClientResult<T> = Result<T, QuillClientError>;

impl QuillClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::CONFLICT => {
                Self::Conflict(message.unwrap_or_else(|| "already exists".to_string()))
            }
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::QuillClientError;

    #[test]
    fn statuses_map_to_variants() {
        assert!(matches!(
            QuillClientError::from_http_status(StatusCode::FORBIDDEN, None),
            QuillClientError::Unauthorized
        ));
        assert!(matches!(
            QuillClientError::from_http_status(StatusCode::NOT_FOUND, Some("x".into())),
            QuillClientError::NotFound
        ));
        assert!(matches!(
            QuillClientError::from_http_status(StatusCode::CONFLICT, Some("slug taken".into())),
            QuillClientError::Conflict(message) if message == "slug taken"
        ));
        assert!(matches!(
            QuillClientError::from_http_status(StatusCode::BAD_REQUEST, None),
            QuillClientError::InvalidRequest(message) if message.contains("400")
        ));
    }
}
