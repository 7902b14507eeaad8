use mag_client::{MagClientError, MagClientResult, TokenStore, parse_token};

/// Единственный ключ, который приложение пишет в `localStorage`.
const TOKEN_KEY: &str = "token";

fn local_storage() -> MagClientResult<web_sys::Storage> {
    let window = web_sys::window()
        .ok_or_else(|| MagClientError::Storage("window is not available".to_string()))?;
    window
        .local_storage()
        .map_err(|_| MagClientError::Storage("failed to access localStorage".to_string()))?
        .ok_or_else(|| MagClientError::Storage("localStorage is not available".to_string()))
}

/// Токен сессии в `localStorage` браузера.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> MagClientResult<Option<String>> {
        let raw = local_storage()?
            .get_item(TOKEN_KEY)
            .map_err(|_| MagClientError::Storage("failed to read token".to_string()))?;
        Ok(raw.as_deref().and_then(parse_token))
    }

    fn save(&self, token: &str) -> MagClientResult<()> {
        local_storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| MagClientError::Storage("failed to save token".to_string()))
    }

    fn clear(&self) -> MagClientResult<()> {
        local_storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| MagClientError::Storage("failed to clear token".to_string()))
    }
}
