use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mag_client::{
    AddressUpdate, ApiConfig, CATEGORIES, CategoryListing, Comment, MagClient, MagClientError,
    Post, ProfileUpdate, Recipe, SessionPhase, TokenStore, User, available_tags, filter_by_tag,
};

mod logging;
mod token_file;

use logging::init_logging;
use token_file::FileTokenStore;

const TOKEN_FILE: &str = ".mag_token";

#[derive(Debug, Parser)]
#[command(name = "mag-cli", version, about = "CLI клиент блога Mag поверх demo API")]
struct Cli {
    /// Базовый URL API авторизации (по умолчанию MAG_AUTH_API_URL или dummyjson).
    #[arg(long, global = true)]
    auth_api: Option<String>,

    /// Базовый URL API ленты (по умолчанию MAG_FEED_API_URL или jsonplaceholder).
    #[arg(long, global = true)]
    feed_api: Option<String>,

    /// Файл, в котором хранится токен сессии.
    #[arg(long, global = true, default_value = TOKEN_FILE)]
    token_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход пользователя. После входа показываются его посты.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённый токен.
    Logout,
    /// Кто сейчас вошёл.
    Whoami,
    /// Лента постов.
    Feed {
        /// Сколько постов показать (только отображение, без пагинации).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Комментарии к посту.
    Comments {
        #[arg(long)]
        post: i64,
    },
    /// Посты пользователя (по умолчанию текущего).
    UserPosts {
        #[arg(long)]
        user: Option<i64>,
    },
    /// Список разделов.
    Categories,
    /// Содержимое раздела.
    Category {
        #[arg(long)]
        slug: String,
        /// Оставить только посты с этим тегом.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Профиль текущего пользователя.
    Profile {
        /// Вывести профиль как JSON.
        #[arg(long)]
        json: bool,
    },
    /// Изменение профиля (demo API ничего не сохраняет).
    Settings {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    init_logging(&log_level)?;

    let cli = Cli::parse();

    let config = resolve_config(
        ApiConfig::from_env().context("не удалось прочитать конфигурацию API")?,
        cli.auth_api,
        cli.feed_api,
    );
    let store = FileTokenStore::new(cli.token_file);
    let mut client = MagClient::new(&config).map_err(map_client_error)?;

    if cli.command.needs_session() {
        let phase = client
            .restore_session(&store)
            .await
            .context("не удалось прочитать сохранённый токен")?;
        tracing::debug!(?phase, "session restored");
    }

    let mut out = io::stdout().lock();

    match cli.command {
        Command::Login { username, password } => {
            login_and_show_posts(&mut client, &store, &username, &password, &mut out).await?;
        }
        Command::Logout => {
            client.logout(&store).map_err(map_client_error)?;
            writeln!(out, "Выход выполнен, {} очищен", store.path().display())?;
        }
        Command::Whoami => match client.session().user() {
            Some(user) => print_user(&mut out, "Текущий пользователь", user)?,
            None => writeln!(out, "anonymous")?,
        },
        Command::Feed { limit } => {
            let posts = client.feed().await.map_err(map_client_error)?;
            let shown = limit.unwrap_or(posts.len()).min(posts.len());
            print_posts(&mut out, "Лента", &posts[..shown])?;
        }
        Command::Comments { post } => {
            let comments = client
                .comments_for_post(post)
                .await
                .map_err(map_client_error)?;
            print_comments(&mut out, post, &comments)?;
        }
        Command::UserPosts { user } => {
            let user_id = match user {
                Some(id) => id,
                None => require_user(&client)?.id,
            };
            let posts = client
                .posts_by_user(user_id)
                .await
                .map_err(map_client_error)?;
            print_posts(&mut out, &format!("Посты пользователя #{user_id}"), &posts)?;
        }
        Command::Categories => {
            for category in CATEGORIES {
                writeln!(out, "- {} ({}): {}", category.label, category.slug, category.description)?;
            }
        }
        Command::Category { slug, tag } => {
            let listing = client.category(&slug).await.map_err(map_client_error)?;
            print_category(&mut out, &slug, &listing, tag.as_deref())?;
        }
        Command::Profile { json } => {
            let user = require_user(&client)?;
            if json {
                let raw = serde_json::to_string_pretty(user).context("не удалось сериализовать профиль")?;
                writeln!(out, "{raw}")?;
            } else {
                print_profile(&mut out, user)?;
            }
        }
        Command::Settings {
            first_name,
            last_name,
            email,
            phone,
            username,
            image,
            street,
            city,
            state,
            postal_code,
        } => {
            let address = AddressUpdate {
                address: street,
                city,
                state,
                postal_code,
            };
            let update = ProfileUpdate {
                first_name,
                last_name,
                email,
                phone,
                username,
                image,
                address: (address != AddressUpdate::default()).then_some(address),
            };
            if update.is_empty() {
                anyhow::bail!("не задано ни одного поля для изменения");
            }

            let user = client
                .update_profile(&update)
                .await
                .map_err(map_client_error)?;
            print_profile(&mut out, &user)?;
            writeln!(out, "Параметры обновлены (симуляция, сервер их не сохраняет)")?;
        }
    }

    Ok(())
}

impl Command {
    fn needs_session(&self) -> bool {
        matches!(
            self,
            Command::Whoami
                | Command::UserPosts { user: None }
                | Command::Profile { .. }
                | Command::Settings { .. }
        )
    }
}

fn resolve_config(base: ApiConfig, auth_api: Option<String>, feed_api: Option<String>) -> ApiConfig {
    ApiConfig {
        auth_base_url: auth_api.map(normalize_server).unwrap_or(base.auth_base_url),
        feed_base_url: feed_api.map(normalize_server).unwrap_or(base.feed_base_url),
        ..base
    }
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("https://{server}")
}

fn require_user(client: &MagClient) -> Result<&User> {
    match client.session().phase() {
        SessionPhase::Authenticated => client
            .session()
            .user()
            .ok_or_else(|| map_client_error(MagClientError::Unauthorized)),
        _ => Err(map_client_error(MagClientError::Unauthorized)),
    }
}

fn map_client_error(err: MagClientError) -> anyhow::Error {
    let message = match err {
        MagClientError::Unauthorized => {
            "требуется авторизация: выполните `mag-cli login ...`".to_string()
        }
        MagClientError::NotFound => "ресурс не найден".to_string(),
        MagClientError::LoginRejected(message) => format!("вход отклонён: {message}"),
        MagClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        MagClientError::Config(message) => format!("ошибка конфигурации: {message}"),
        MagClientError::Storage(message) => format!("ошибка хранилища токена: {message}"),
        MagClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

/// Вход и переход к своим постам: CLI печатает их сразу после входа.
async fn login_and_show_posts(
    client: &mut MagClient,
    store: &impl TokenStore,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<User> {
    let user = client
        .login(store, username, password)
        .await
        .map_err(map_client_error)?;
    print_user(out, "Вход выполнен", &user)?;

    let posts = client
        .posts_by_user(user.id)
        .await
        .map_err(map_client_error)?;
    print_posts(out, &format!("Посты пользователя #{}", user.id), &posts)?;
    Ok(user)
}

fn print_user(out: &mut impl Write, title: &str, user: &User) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "  id: {}", user.id)?;
    writeln!(out, "  username: {}", user.username)?;
    writeln!(out, "  name: {}", user.display_name())?;
    writeln!(out, "  email: {}", user.email)
}

fn print_profile(out: &mut impl Write, user: &User) -> io::Result<()> {
    print_user(out, "Профиль", user)?;
    if let Some(phone) = &user.phone {
        writeln!(out, "  phone: {phone}")?;
    }
    if let Some(address) = &user.address {
        writeln!(
            out,
            "  address: {}, {} {}, {}",
            address.address, address.postal_code, address.city, address.state
        )?;
    }
    if let Some(company) = &user.company {
        writeln!(out, "  company: {} ({}, {})", company.name, company.title, company.department)?;
    }
    Ok(())
}

fn print_posts(out: &mut impl Write, title: &str, posts: &[Post]) -> io::Result<()> {
    writeln!(out, "{title}: {}", posts.len())?;
    for post in posts {
        writeln!(out, "- [{}] {} (user_id={})", post.id, post.title, post.user_id)?;
    }
    Ok(())
}

fn print_comments(out: &mut impl Write, post_id: i64, comments: &[Comment]) -> io::Result<()> {
    writeln!(out, "Комментарии к посту #{post_id}: {}", comments.len())?;
    if comments.is_empty() {
        writeln!(out, "  пока нет комментариев")?;
    }
    for comment in comments {
        writeln!(
            out,
            "- {} (@{}): {}",
            comment.author_display(),
            comment.user.username,
            comment.body
        )?;
    }
    Ok(())
}

fn print_recipes(out: &mut impl Write, recipes: &[Recipe]) -> io::Result<()> {
    writeln!(out, "Рецепты: {}", recipes.len())?;
    for recipe in recipes {
        writeln!(
            out,
            "- [{}] {} ({} • {:?})",
            recipe.id, recipe.name, recipe.cuisine, recipe.difficulty
        )?;
    }
    Ok(())
}

fn print_category(
    out: &mut impl Write,
    slug: &str,
    listing: &CategoryListing,
    tag: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "#{slug}")?;
    match listing {
        CategoryListing::Recipes(recipes) => print_recipes(out, recipes),
        CategoryListing::Posts(posts) => {
            let tags = available_tags(posts);
            if !tags.is_empty() {
                writeln!(out, "Теги: {}", tags.join(", "))?;
            }

            let filtered = filter_by_tag(posts, tag);
            if filtered.is_empty() {
                writeln!(out, "Нет постов с этим тегом")?;
            }
            for post in filtered {
                let likes = post.reactions.map(|r| r.likes).unwrap_or_default();
                writeln!(out, "- [{}] {} ({} likes)", post.id, post.title, likes)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("http://127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn normalize_server_adds_https_scheme() {
        let s = normalize_server("dummyjson.com".to_string());
        assert_eq!(s, "https://dummyjson.com");
    }

    #[test]
    fn resolve_config_keeps_env_values_without_flags() {
        let config = resolve_config(ApiConfig::default(), None, None);
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn resolve_config_applies_flags() {
        let config = resolve_config(
            ApiConfig::default(),
            Some("localhost:9000".to_string()),
            Some("http://localhost:9001".to_string()),
        );
        assert_eq!(config.auth_base_url, "https://localhost:9000");
        assert_eq!(config.feed_base_url, "http://localhost:9001");
    }

    #[test]
    fn only_session_commands_restore_token() {
        assert!(Command::Whoami.needs_session());
        assert!(Command::UserPosts { user: None }.needs_session());
        assert!(!Command::UserPosts { user: Some(1) }.needs_session());
        assert!(!Command::Feed { limit: None }.needs_session());
        assert!(!Command::Logout.needs_session());
    }

    #[test]
    fn cli_parses_login() {
        let cli = Cli::try_parse_from([
            "mag-cli",
            "login",
            "--username",
            "emilys",
            "--password",
            "emilyspass",
        ])
        .expect("valid args");
        assert_eq!(cli.token_file, TOKEN_FILE);
        assert!(matches!(cli.command, Command::Login { .. }));
    }

    #[tokio::test]
    async fn login_prints_own_posts() {
        use httpmock::prelude::*;
        use mag_client::MemoryTokenStore;
        use serde_json::json;

        let server = MockServer::start_async().await;
        let login = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(200).json_body(json!({
                    "id": 7,
                    "username": "michaelw",
                    "email": "michael@x.dummyjson.com",
                    "firstName": "Michael",
                    "lastName": "Williams",
                    "accessToken": "token-7"
                }));
            })
            .await;
        let own_posts = server
            .mock_async(|when, then| {
                when.method(GET).path("/posts").query_param("userId", "7");
                then.status(200).json_body(json!([
                    { "id": 61, "userId": 7, "title": "mon premier post", "body": "..." }
                ]));
            })
            .await;

        let config = ApiConfig {
            auth_base_url: server.base_url(),
            feed_base_url: server.base_url(),
            ..ApiConfig::default()
        };
        let mut client = MagClient::new(&config).expect("client");
        let store = MemoryTokenStore::new();
        let mut out = Vec::new();

        let user = login_and_show_posts(&mut client, &store, "michaelw", "michaelwpass", &mut out)
            .await
            .expect("login");

        login.assert_async().await;
        own_posts.assert_async().await;
        assert_eq!(user.id, 7);
        assert_eq!(store.load().expect("load").as_deref(), Some("token-7"));

        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("Посты пользователя #7: 1"));
        assert!(printed.contains("mon premier post"));
    }

    #[tokio::test]
    async fn failed_login_does_not_request_posts() {
        use httpmock::prelude::*;
        use mag_client::MemoryTokenStore;
        use serde_json::json;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(400).json_body(json!({ "message": "Invalid credentials" }));
            })
            .await;
        let posts = server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(200).json_body(json!([]));
            })
            .await;

        let config = ApiConfig {
            auth_base_url: server.base_url(),
            feed_base_url: server.base_url(),
            ..ApiConfig::default()
        };
        let mut client = MagClient::new(&config).expect("client");
        let mut out = Vec::new();

        let err = login_and_show_posts(&mut client, &MemoryTokenStore::new(), "x", "y", &mut out)
            .await
            .expect_err("login must fail");

        assert!(err.to_string().contains("Invalid credentials"));
        assert_eq!(posts.hits_async().await, 0);
        assert!(out.is_empty());
    }
}
