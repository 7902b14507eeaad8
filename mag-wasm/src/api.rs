use gloo_net::http::{Request, Response};
use serde::{Serialize, de::DeserializeOwned};

use mag_client::{
    AuthResponse, Comment, CommentList, DEFAULT_AUTH_API_URL, DEFAULT_FEED_API_URL, Post,
    PostList, ProfileUpdate, Recipe, RecipeList, User,
};

const AUTH_API_URL: &str = match option_env!("MAG_AUTH_API_URL") {
    Some(value) => value,
    None => DEFAULT_AUTH_API_URL,
};

const FEED_API_URL: &str = match option_env!("MAG_FEED_API_URL") {
    Some(value) => value,
    None => DEFAULT_FEED_API_URL,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    expires_in_mins: u32,
}

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "{message} (HTTP {status})"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn error_message(response: Response) -> Option<String> {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(str::to_string))
        .filter(|message| !message.trim().is_empty())
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let message = error_message(response).await;

    let fallback = match status {
        400 => "Некорректный запрос".to_string(),
        401 => "Требуется авторизация".to_string(),
        403 => "Недостаточно прав для этой операции".to_string(),
        404 => "Ресурс не найден".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    ApiError::Http {
        status,
        message: message.unwrap_or(fallback),
    }
}

async fn get<T: DeserializeOwned>(url: &str, token: Option<&str>) -> Result<T, ApiError> {
    let mut request = Request::get(url);
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }

    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn login(username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let payload = LoginRequest {
        username,
        password,
        expires_in_mins: 60,
    };

    let response = Request::post(&endpoint(AUTH_API_URL, "/auth/login"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let message = error_message(response)
            .await
            .unwrap_or_else(|| "Неверный логин или пароль".to_string());
        return Err(ApiError::Http { status, message });
    }

    parse_json(response).await
}

pub(crate) async fn me(token: &str) -> Result<User, ApiError> {
    get(&endpoint(AUTH_API_URL, "/auth/me"), Some(token)).await
}

pub(crate) async fn user(id: i64) -> Result<User, ApiError> {
    get(&endpoint(AUTH_API_URL, &format!("/users/{id}")), None).await
}

pub(crate) async fn update_user(id: i64, update: &ProfileUpdate) -> Result<User, ApiError> {
    let response = Request::put(&endpoint(AUTH_API_URL, &format!("/users/{id}")))
        .json(update)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    get(&endpoint(FEED_API_URL, "/posts"), None).await
}

pub(crate) async fn posts_by_user(user_id: i64) -> Result<Vec<Post>, ApiError> {
    get(&endpoint(FEED_API_URL, &format!("/posts?userId={user_id}")), None).await
}

pub(crate) async fn posts_by_tag(tag: &str) -> Result<Vec<Post>, ApiError> {
    let tag = String::from(js_sys::encode_uri_component(tag));
    let list: PostList = get(&endpoint(AUTH_API_URL, &format!("/posts/tag/{tag}")), None).await?;
    Ok(list.posts)
}

pub(crate) async fn comments_for_post(post_id: i64) -> Result<Vec<Comment>, ApiError> {
    let list: CommentList = get(
        &endpoint(AUTH_API_URL, &format!("/comments/post/{post_id}")),
        None,
    )
    .await?;
    Ok(list.comments)
}

pub(crate) async fn recipes() -> Result<Vec<Recipe>, ApiError> {
    let list: RecipeList = get(&endpoint(AUTH_API_URL, "/recipes"), None).await?;
    Ok(list.recipes)
}
