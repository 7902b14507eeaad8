use std::time::Duration;

use crate::error::{MagClientError, MagClientResult};

/// Базовый URL API авторизации, профилей, тегов, комментариев и рецептов.
pub const DEFAULT_AUTH_API_URL: &str = "https://dummyjson.com";
/// Базовый URL API ленты постов.
pub const DEFAULT_FEED_API_URL: &str = "https://jsonplaceholder.typicode.com";
/// Таймаут запроса по умолчанию, секунды.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Адреса двух demo API и таймаут запросов.
pub struct ApiConfig {
    /// `dummyjson`: вход, профиль, теги, комментарии, рецепты.
    pub auth_base_url: String,
    /// `jsonplaceholder`: лента и посты пользователя.
    pub feed_base_url: String,
    /// Таймаут одного запроса.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_API_URL.to_string(),
            feed_base_url: DEFAULT_FEED_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Читает `MAG_AUTH_API_URL`, `MAG_FEED_API_URL`, `MAG_HTTP_TIMEOUT_SECS`.
    ///
    /// Отсутствующие переменные заменяются значениями по умолчанию.
    pub fn from_env() -> MagClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MagClientResult<Self> {
        let auth_base_url = non_blank(lookup("MAG_AUTH_API_URL"))
            .unwrap_or_else(|| DEFAULT_AUTH_API_URL.to_string());
        let feed_base_url = non_blank(lookup("MAG_FEED_API_URL"))
            .unwrap_or_else(|| DEFAULT_FEED_API_URL.to_string());

        let timeout_secs = match non_blank(lookup("MAG_HTTP_TIMEOUT_SECS")) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                MagClientError::Config(format!(
                    "failed to parse MAG_HTTP_TIMEOUT_SECS='{raw}', expecting positive integer"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(MagClientError::Config(
                "MAG_HTTP_TIMEOUT_SECS must be > 0".to_string(),
            ));
        }

        Ok(Self {
            auth_base_url,
            feed_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn env_overrides_urls_and_timeout() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("MAG_AUTH_API_URL", " http://127.0.0.1:9000 "),
            ("MAG_FEED_API_URL", "http://127.0.0.1:9001"),
            ("MAG_HTTP_TIMEOUT_SECS", "3"),
        ]))
        .expect("valid config");

        assert_eq!(config.auth_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.feed_base_url, "http://127.0.0.1:9001");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for raw in ["0", "soon"] {
            let result = ApiConfig::from_lookup(lookup(&[("MAG_HTTP_TIMEOUT_SECS", raw)]));
            assert!(matches!(result, Err(MagClientError::Config(_))));
        }
    }
}
