use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{MagClientError, MagClientResult};
use crate::models::{
    AuthResponse, Comment, CommentList, Post, PostList, ProfileUpdate, Recipe, RecipeList, User,
};

/// Время жизни токена, которое запрашивается при входе.
const TOKEN_TTL_MINUTES: u32 = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
    expires_in_mins: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostsByUserQuery {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Api {
    Auth,
    Feed,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для двух demo REST API.
pub struct HttpClient {
    auth_base_url: String,
    feed_base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с адресами и таймаутом из конфигурации.
    pub fn new(config: &ApiConfig) -> MagClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            auth_base_url: config.auth_base_url.clone(),
            feed_base_url: config.feed_base_url.clone(),
            client,
        })
    }

    fn endpoint(&self, api: Api, path: &str) -> String {
        let base = match api {
            Api::Auth => &self.auth_base_url,
            Api::Feed => &self.feed_base_url,
        };
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `endpoint` плюс один экранированный сегмент пути.
    fn segment_endpoint(&self, api: Api, path: &str, segment: &str) -> MagClientResult<String> {
        let mut url = Url::parse(&self.endpoint(api, path))
            .map_err(|err| MagClientError::Config(format!("invalid api url: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| MagClientError::Config("api url cannot have a path".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url.into())
    }

    async fn error_message(response: reqwest::Response) -> Option<String> {
        response
            .json::<ErrorResponseDto>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
    }

    async fn decode_error(response: reqwest::Response) -> MagClientError {
        let status = response.status();
        let message = Self::error_message(response).await;
        MagClientError::from_http_status(status, message)
    }

    async fn send<TRes>(&self, request: RequestBuilder) -> MagClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(MagClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(MagClientError::from_reqwest)
    }

    async fn get_json<TRes>(&self, api: Api, path: &str, token: Option<&str>) -> MagClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(api, path);
        debug!(%url, "GET");

        let mut request = self.client.request(Method::GET, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    /// Выполняет вход и возвращает токен + профиль.
    ///
    /// Любой неуспешный ответ превращается в [`MagClientError::LoginRejected`]
    /// с сообщением API, либо "invalid credentials".
    pub async fn login(&self, username: &str, password: &str) -> MagClientResult<AuthResponse> {
        let url = self.endpoint(Api::Auth, "/auth/login");
        debug!(%url, username, "POST login");

        let payload = LoginRequestDto {
            username,
            password,
            expires_in_mins: TOKEN_TTL_MINUTES,
        };
        let response = self
            .client
            .request(Method::POST, url)
            .json(&payload)
            .send()
            .await
            .map_err(MagClientError::from_reqwest)?;

        if !response.status().is_success() {
            let message = Self::error_message(response)
                .await
                .unwrap_or_else(|| "invalid credentials".to_string());
            return Err(MagClientError::LoginRejected(message));
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(MagClientError::from_reqwest)
    }

    /// Профиль владельца токена.
    pub async fn me(&self, token: &str) -> MagClientResult<User> {
        self.get_json(Api::Auth, "/auth/me", Some(token)).await
    }

    /// Профиль пользователя по идентификатору.
    pub async fn user(&self, id: i64) -> MagClientResult<User> {
        self.get_json(Api::Auth, &format!("/users/{id}"), None).await
    }

    /// Отправляет изменения профиля. API отвечает, но ничего не сохраняет.
    pub async fn update_user(&self, id: i64, update: &ProfileUpdate) -> MagClientResult<User> {
        let url = self.endpoint(Api::Auth, &format!("/users/{id}"));
        debug!(%url, "PUT user");

        let request = self.client.request(Method::PUT, url).json(update);
        self.send(request).await
    }

    /// Лента постов.
    pub async fn list_posts(&self) -> MagClientResult<Vec<Post>> {
        self.get_json(Api::Feed, "/posts", None).await
    }

    /// Посты одного пользователя.
    pub async fn posts_by_user(&self, user_id: i64) -> MagClientResult<Vec<Post>> {
        let url = self.endpoint(Api::Feed, "/posts");
        debug!(%url, user_id, "GET posts by user");

        let request = self
            .client
            .request(Method::GET, url)
            .query(&PostsByUserQuery { user_id });
        self.send(request).await
    }

    /// Посты с тегом.
    pub async fn posts_by_tag(&self, tag: &str) -> MagClientResult<Vec<Post>> {
        let url = self.segment_endpoint(Api::Auth, "/posts/tag", tag)?;
        debug!(%url, tag, "GET posts by tag");

        let list: PostList = self.send(self.client.request(Method::GET, url)).await?;
        Ok(list.posts)
    }

    /// Комментарии к посту.
    pub async fn comments_for_post(&self, post_id: i64) -> MagClientResult<Vec<Comment>> {
        let list: CommentList = self
            .get_json(Api::Auth, &format!("/comments/post/{post_id}"), None)
            .await?;
        Ok(list.comments)
    }

    /// Рецепты.
    pub async fn recipes(&self) -> MagClientResult<Vec<Recipe>> {
        let list: RecipeList = self.get_json(Api::Auth, "/recipes", None).await?;
        Ok(list.recipes)
    }
}
