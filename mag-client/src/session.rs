//! Состояние сессии: токен, пользователь и фаза входа.
//!
//! `Session` не делает сетевых вызовов и ничего не знает о хранилище. Это
//! позволяет использовать одну и ту же машину состояний в CLI (поверх
//! `MagClient`) и в браузере (поверх сигналов Leptos).

use std::sync::Mutex;

use crate::error::{MagClientError, MagClientResult};
use crate::models::{AuthResponse, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Фаза сессии.
pub enum SessionPhase {
    /// Пользователь не вошёл.
    Anonymous,
    /// Идёт вход или проверка сохранённого токена.
    Authenticating,
    /// Пользователь известен.
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Номер попытки входа, выданный [`Session::begin_login`].
///
/// Ответ по устаревшей попытке (после неё уже начата новая) игнорируется.
pub struct LoginTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
/// Клиентская сессия: непрозрачный токен и закэшированный профиль.
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    restoring: bool,
    pending_login: Option<u64>,
    login_attempts: u64,
}

impl Session {
    /// Пустая сессия без токена.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Сессия с сохранённым токеном, который ещё предстоит проверить.
    pub fn restoring(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            restoring: true,
            ..Self::default()
        }
    }

    /// Текущая фаза.
    pub fn phase(&self) -> SessionPhase {
        if self.restoring || self.pending_login.is_some() {
            return SessionPhase::Authenticating;
        }
        if self.user.is_some() {
            return SessionPhase::Authenticated;
        }
        SessionPhase::Anonymous
    }

    /// Токен, если он есть.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Пользователь, если сессия подтверждена.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `true`, если профиль пользователя загружен.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// `true`, пока идёт вход или проверка токена.
    pub fn is_loading(&self) -> bool {
        self.phase() == SessionPhase::Authenticating
    }

    /// Начинает попытку входа.
    pub fn begin_login(&mut self) -> LoginTicket {
        self.login_attempts += 1;
        self.pending_login = Some(self.login_attempts);
        LoginTicket(self.login_attempts)
    }

    /// Фиксирует успешный вход.
    ///
    /// Возвращает `false` и ничего не меняет, если `ticket` устарел.
    pub fn complete_login(&mut self, ticket: LoginTicket, auth: AuthResponse) -> bool {
        if self.pending_login != Some(ticket.0) {
            return false;
        }
        self.pending_login = None;
        self.restoring = false;
        self.token = Some(auth.access_token);
        self.user = Some(auth.user);
        true
    }

    /// Завершает неудачную попытку входа. Состояние сессии не меняется.
    pub fn fail_login(&mut self, ticket: LoginTicket) {
        if self.pending_login == Some(ticket.0) {
            self.pending_login = None;
        }
    }

    /// Применяет результат проверки сохранённого токена.
    ///
    /// Любая ошибка (сеть, отказ API) означает тихий выход: токен и
    /// пользователь очищаются. Возвращает `true`, если сессия подтверждена.
    pub fn resolve_restore<E>(&mut self, result: Result<User, E>) -> bool {
        if !self.restoring {
            return self.is_authenticated();
        }
        self.restoring = false;
        match result {
            Ok(user) => {
                self.user = Some(user);
                true
            }
            Err(_) => {
                self.token = None;
                self.user = None;
                false
            }
        }
    }

    /// Выход: очищает токен, пользователя и незавершённый вход.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.restoring = false;
        self.pending_login = None;
    }

    /// Заменяет профиль после изменения настроек.
    ///
    /// Ничего не делает в анонимной сессии.
    pub fn update_user(&mut self, user: User) {
        if self.user.is_some() {
            self.user = Some(user);
        }
    }
}

/// Место, где между запусками живёт токен сессии.
pub trait TokenStore {
    /// Читает сохранённый токен. Пустое значение считается отсутствием токена.
    fn load(&self) -> MagClientResult<Option<String>>;
    /// Сохраняет токен.
    fn save(&self, token: &str) -> MagClientResult<()>;
    /// Удаляет токен.
    fn clear(&self) -> MagClientResult<()>;
}

/// Нормализует сырое содержимое хранилища.
pub fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Debug, Default)]
/// Хранилище токена в памяти процесса.
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с уже сохранённым токеном.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> MagClientResult<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| MagClientError::Storage("token lock poisoned".to_string()))?;
        Ok(guard.as_deref().and_then(parse_token))
    }

    fn save(&self, token: &str) -> MagClientResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| MagClientError::Storage("token lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> MagClientResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| MagClientError::Storage("token lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
