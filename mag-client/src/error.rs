use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `mag-client`.
pub enum MagClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (нет сессии или токен отклонён).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Demo API отклонил логин/пароль.
    #[error("login rejected: {0}")]
    LoginRejected(String),

    /// Некорректный запрос или ошибка, которую API вернул текстом.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Некорректная конфигурация клиента.
    #[error("invalid config: {0}")]
    Config(String),

    /// Ошибка хранилища токена (файл, localStorage).
    #[error("token storage error: {0}")]
    Storage(String),
}

/// Результат операций `mag-client`.
pub type MagClientResult<T> = Result<T, MagClientError>;

#[cfg(feature = "http")]
impl MagClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
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
