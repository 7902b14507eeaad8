//! Клиентская библиотека блога "Mag" поверх двух публичных demo API.
//!
//! - `dummyjson`: вход, профиль, посты по тегу, комментарии, рецепты;
//! - `jsonplaceholder`: лента и посты пользователя.
//!
//! Без фичи `http` остаются модели и чистая логика (сессия, локальная доска
//! постов, разделы), которые переиспользует браузерный фронтенд.
#![warn(missing_docs)]

mod board;
mod category;
mod config;
mod error;
#[cfg(feature = "http")]
mod http_client;
mod models;
mod session;

pub use board::{PostBoard, PostDraft};
pub use category::{
    CATEGORIES, Category, CategorySource, RECIPES_SLUG, available_tags, filter_by_tag,
};
pub use config::{ApiConfig, DEFAULT_AUTH_API_URL, DEFAULT_FEED_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{MagClientError, MagClientResult};
pub use models::{
    Address, AddressUpdate, AuthResponse, Comment, CommentAuthor, CommentList, Company,
    Coordinates, Difficulty, Post, PostList, ProfileUpdate, Reactions, Recipe, RecipeList, User,
};
pub use session::{
    LoginTicket, MemoryTokenStore, Session, SessionPhase, TokenStore, parse_token,
};

#[cfg(feature = "http")]
pub use http_client::HttpClient;

#[derive(Debug, Clone, PartialEq)]
/// Содержимое раздела блога.
pub enum CategoryListing {
    /// Посты с тегом раздела.
    Posts(Vec<Post>),
    /// Рецепты.
    Recipes(Vec<Recipe>),
}

#[cfg(feature = "http")]
#[derive(Debug, Clone)]
/// Клиент блога: HTTP-запросы к demo API плюс состояние сессии.
pub struct MagClient {
    http: HttpClient,
    session: Session,
}

#[cfg(feature = "http")]
impl MagClient {
    /// Создаёт клиент с анонимной сессией.
    pub fn new(config: &ApiConfig) -> MagClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            session: Session::anonymous(),
        })
    }

    /// Текущая сессия.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Восстанавливает сессию по сохранённому токену.
    ///
    /// Токен проверяется запросом `/auth/me`. Любая ошибка проверки (сеть,
    /// отказ API) означает тихий выход: токен удаляется из `store`, сессия
    /// становится анонимной. Ошибкой возвращается только сбой хранилища.
    pub async fn restore_session(&mut self, store: &impl TokenStore) -> MagClientResult<SessionPhase> {
        let Some(token) = store.load()? else {
            self.session = Session::anonymous();
            return Ok(SessionPhase::Anonymous);
        };

        self.session = Session::restoring(token.clone());
        let result = self.http.me(&token).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "stored session token rejected, logging out");
        }

        if !self.session.resolve_restore(result) {
            store.clear()?;
        }
        Ok(self.session.phase())
    }

    /// Выполняет вход, сохраняет токен в `store` и возвращает пользователя.
    ///
    /// Токен сохраняется только после того, как сессия приняла ответ. Если
    /// API отклонил вход, сессия и хранилище не меняются. Если токен не
    /// удалось сохранить, сессия сбрасывается в анонимную.
    pub async fn login(
        &mut self,
        store: &impl TokenStore,
        username: &str,
        password: &str,
    ) -> MagClientResult<User> {
        let ticket = self.session.begin_login();

        let auth = match self.http.login(username, password).await {
            Ok(auth) => auth,
            Err(err) => {
                self.session.fail_login(ticket);
                return Err(err);
            }
        };

        let token = auth.access_token.clone();
        let user = auth.user.clone();
        if !self.session.complete_login(ticket, auth) {
            return Err(MagClientError::LoginRejected(
                "superseded by a newer login".to_string(),
            ));
        }

        if let Err(err) = store.save(&token) {
            self.session.logout();
            return Err(err);
        }

        tracing::debug!(user_id = user.id, "logged in");
        Ok(user)
    }

    /// Выход без сетевого запроса: очищает сессию и хранилище.
    pub fn logout(&mut self, store: &impl TokenStore) -> MagClientResult<()> {
        self.session.logout();
        store.clear()
    }

    /// Лента постов.
    pub async fn feed(&self) -> MagClientResult<Vec<Post>> {
        self.http.list_posts().await
    }

    /// Посты пользователя.
    pub async fn posts_by_user(&self, user_id: i64) -> MagClientResult<Vec<Post>> {
        self.http.posts_by_user(user_id).await
    }

    /// Содержимое раздела по его slug.
    pub async fn category(&self, slug: &str) -> MagClientResult<CategoryListing> {
        match CategorySource::for_slug(slug) {
            CategorySource::Recipes => Ok(CategoryListing::Recipes(self.http.recipes().await?)),
            CategorySource::Tag(tag) => {
                Ok(CategoryListing::Posts(self.http.posts_by_tag(&tag).await?))
            }
        }
    }

    /// Комментарии к посту.
    pub async fn comments_for_post(&self, post_id: i64) -> MagClientResult<Vec<Comment>> {
        self.http.comments_for_post(post_id).await
    }

    /// Профиль автора поста.
    pub async fn author(&self, user_id: i64) -> MagClientResult<User> {
        self.http.user(user_id).await
    }

    /// Отправляет изменения профиля и сливает их в пользователя сессии.
    ///
    /// Требует подтверждённую сессию.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> MagClientResult<User> {
        let mut user = self
            .session
            .user()
            .cloned()
            .ok_or(MagClientError::Unauthorized)?;

        self.http.update_user(user.id, update).await?;

        update.apply_to(&mut user);
        self.session.update_user(user.clone());
        Ok(user)
    }
}
