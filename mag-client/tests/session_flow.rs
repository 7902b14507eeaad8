use httpmock::prelude::*;
use serde_json::json;

use mag_client::{
    ApiConfig, MagClient, MagClientError, MagClientResult, MemoryTokenStore, SessionPhase,
    TokenStore,
};

/// Хранилище, в которое нельзя записать.
struct ReadOnlyStore;

impl TokenStore for ReadOnlyStore {
    fn load(&self) -> MagClientResult<Option<String>> {
        Ok(None)
    }

    fn save(&self, _token: &str) -> MagClientResult<()> {
        Err(MagClientError::Storage("read-only".to_string()))
    }

    fn clear(&self) -> MagClientResult<()> {
        Ok(())
    }
}

fn client_for(server: &MockServer) -> MagClient {
    let config = ApiConfig {
        auth_base_url: server.base_url(),
        feed_base_url: server.base_url(),
        ..ApiConfig::default()
    };
    MagClient::new(&config).expect("client should build")
}

fn emily() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "emilys",
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

fn login_ok() -> serde_json::Value {
    let mut body = emily();
    body["accessToken"] = json!("token-1");
    body["refreshToken"] = json!("refresh-1");
    body
}

#[tokio::test]
async fn login_with_valid_credentials_authenticates_and_persists_token() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body_partial(r#"{"username":"emilys","password":"emilyspass","expiresInMins":60}"#);
            then.status(200).json_body(login_ok());
        })
        .await;

    let store = MemoryTokenStore::new();
    let mut client = client_for(&server);

    let user = client
        .login(&store, "emilys", "emilyspass")
        .await
        .expect("login must succeed");

    login.assert_async().await;
    assert_eq!(user.id, 1);
    assert_eq!(client.session().phase(), SessionPhase::Authenticated);
    assert_eq!(client.session().token(), Some("token-1"));
    assert_eq!(store.load().expect("load").as_deref(), Some("token-1"));
}

#[tokio::test]
async fn login_with_unknown_credentials_stays_anonymous() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(400)
                .json_body(json!({ "message": "Invalid credentials" }));
        })
        .await;

    let store = MemoryTokenStore::new();
    let mut client = client_for(&server);

    let result = client.login(&store, "nobody", "wrong").await;

    match result {
        Err(MagClientError::LoginRejected(message)) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected login rejection, got {other:?}"),
    }
    assert_eq!(client.session().phase(), SessionPhase::Anonymous);
    assert!(client.session().token().is_none());
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn login_rejection_without_message_uses_generic_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(500).body("oops");
        })
        .await;

    let mut client = client_for(&server);
    let err = client
        .login(&MemoryTokenStore::new(), "emilys", "x")
        .await
        .expect_err("login must fail");

    assert_eq!(err.to_string(), "login rejected: invalid credentials");
}

#[tokio::test]
async fn restore_with_valid_token_authenticates() {
    let server = MockServer::start_async().await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/me")
                .header("authorization", "Bearer saved-token");
            then.status(200).json_body(emily());
        })
        .await;

    let store = MemoryTokenStore::with_token("saved-token");
    let mut client = client_for(&server);

    let phase = client.restore_session(&store).await.expect("restore");

    me.assert_async().await;
    assert_eq!(phase, SessionPhase::Authenticated);
    assert_eq!(client.session().user().map(|u| u.username.as_str()), Some("emilys"));
    assert_eq!(store.load().expect("load").as_deref(), Some("saved-token"));
}

#[tokio::test]
async fn restore_with_rejected_token_clears_store() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(401).json_body(json!({ "message": "Token Expired!" }));
        })
        .await;

    let store = MemoryTokenStore::with_token("expired");
    let mut client = client_for(&server);

    let phase = client.restore_session(&store).await.expect("restore");

    assert_eq!(phase, SessionPhase::Anonymous);
    assert!(client.session().token().is_none());
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn restore_when_api_is_unreachable_is_silent_logout() {
    let config = ApiConfig {
        auth_base_url: "http://127.0.0.1:1".to_string(),
        feed_base_url: "http://127.0.0.1:1".to_string(),
        ..ApiConfig::default()
    };
    let mut client = MagClient::new(&config).expect("client should build");
    let store = MemoryTokenStore::with_token("saved");

    let phase = client.restore_session(&store).await.expect("restore");

    assert_eq!(phase, SessionPhase::Anonymous);
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn restore_without_token_skips_network() {
    let server = MockServer::start_async().await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(emily());
        })
        .await;

    let mut client = client_for(&server);
    let phase = client
        .restore_session(&MemoryTokenStore::new())
        .await
        .expect("restore");

    assert_eq!(phase, SessionPhase::Anonymous);
    assert_eq!(me.hits_async().await, 0);
}

#[tokio::test]
async fn logout_clears_token_so_next_start_is_anonymous() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(login_ok());
        })
        .await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(emily());
        })
        .await;

    let store = MemoryTokenStore::new();
    let mut client = client_for(&server);
    client
        .login(&store, "emilys", "emilyspass")
        .await
        .expect("login must succeed");

    client.logout(&store).expect("logout");
    assert_eq!(client.session().phase(), SessionPhase::Anonymous);

    let mut reloaded = client_for(&server);
    let phase = reloaded.restore_session(&store).await.expect("restore");
    assert_eq!(phase, SessionPhase::Anonymous);
    assert_eq!(me.hits_async().await, 0);
}

#[tokio::test]
async fn comments_match_selected_post() {
    let server = MockServer::start_async().await;
    let comments = server
        .mock_async(|when, then| {
            when.method(GET).path("/comments/post/6");
            then.status(200).json_body(json!({
                "comments": [
                    { "id": 1, "body": "First!", "postId": 6, "likes": 3,
                      "user": { "id": 63, "username": "eburras1q", "fullName": "Eleanor Burras" } },
                    { "id": 2, "body": "Nice", "postId": 6, "likes": 0,
                      "user": { "id": 71, "username": "jtreleven1y", "fullName": "" } }
                ],
                "total": 2, "skip": 0, "limit": 2
            }));
        })
        .await;

    let client = client_for(&server);
    let list = client.comments_for_post(6).await.expect("comments");

    comments.assert_async().await;
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|c| c.post_id == 6));
    assert_eq!(list[0].author_display(), "Eleanor Burras");
    assert_eq!(list[1].author_display(), "jtreleven1y");
}

#[tokio::test]
async fn posts_by_user_filters_by_user_id() {
    let server = MockServer::start_async().await;
    let posts = server
        .mock_async(|when, then| {
            when.method(GET).path("/posts").query_param("userId", "2");
            then.status(200).json_body(json!([
                { "userId": 2, "id": 11, "title": "t1", "body": "b1" },
                { "userId": 2, "id": 12, "title": "t2", "body": "b2" }
            ]));
        })
        .await;

    let client = client_for(&server);
    let list = client.posts_by_user(2).await.expect("posts");

    posts.assert_async().await;
    assert_eq!(list.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11, 12]);
}

#[tokio::test]
async fn feed_failure_surfaces_as_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts");
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    assert!(matches!(client.feed().await, Err(MagClientError::NotFound)));
}

#[tokio::test]
async fn category_uses_mapped_tag_or_recipes() {
    use mag_client::CategoryListing;

    let server = MockServer::start_async().await;
    let tagged = server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/tag/magical");
            then.status(200).json_body(json!({
                "posts": [{ "id": 3, "title": "t", "body": "b", "userId": 1,
                            "tags": ["magical"], "reactions": { "likes": 5, "dislikes": 1 } }],
                "total": 1
            }));
        })
        .await;
    let recipes = server
        .mock_async(|when, then| {
            when.method(GET).path("/recipes");
            then.status(200).json_body(json!({
                "recipes": [{ "id": 1, "name": "Classic Margherita Pizza", "difficulty": "Easy" }],
                "total": 1
            }));
        })
        .await;

    let client = client_for(&server);

    match client.category("voyage").await.expect("category") {
        CategoryListing::Posts(posts) => {
            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].reactions.map(|r| r.likes), Some(5));
        }
        other => panic!("expected posts, got {other:?}"),
    }
    match client.category("recipes").await.expect("category") {
        CategoryListing::Recipes(list) => assert_eq!(list[0].name, "Classic Margherita Pizza"),
        other => panic!("expected recipes, got {other:?}"),
    }

    tagged.assert_async().await;
    recipes.assert_async().await;
}

#[tokio::test]
async fn update_profile_requires_session_and_merges_locally() {
    use mag_client::ProfileUpdate;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(login_ok());
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/users/1")
                .json_body_partial(r#"{"phone":"+33 1 23 45 67 89"}"#);
            // demo API отвечает только частью полей
            then.status(200).json_body(json!({ "id": 1, "phone": "+33 1 23 45 67 89" }));
        })
        .await;

    let update = ProfileUpdate {
        phone: Some("+33 1 23 45 67 89".to_string()),
        ..ProfileUpdate::default()
    };

    let mut client = client_for(&server);
    assert!(matches!(
        client.update_profile(&update).await,
        Err(MagClientError::Unauthorized)
    ));

    client
        .login(&MemoryTokenStore::new(), "emilys", "emilyspass")
        .await
        .expect("login must succeed");
    let user = client.update_profile(&update).await.expect("update");

    put.assert_async().await;
    assert_eq!(user.phone.as_deref(), Some("+33 1 23 45 67 89"));
    assert_eq!(user.first_name, "Emily");
    assert_eq!(client.session().user(), Some(&user));
}

#[tokio::test]
async fn login_with_unwritable_store_leaves_session_anonymous() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(login_ok());
        })
        .await;

    let mut client = client_for(&server);
    let err = client
        .login(&ReadOnlyStore, "emilys", "emilyspass")
        .await
        .expect_err("token cannot be saved");

    assert!(matches!(err, MagClientError::Storage(_)));
    assert_eq!(client.session().phase(), SessionPhase::Anonymous);
    assert!(client.session().token().is_none());
}

#[tokio::test]
async fn category_tag_is_sent_as_a_single_path_segment() {
    let server = MockServer::start_async().await;
    let split = server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/tag/tech").query_param("limit", "1");
            then.status(200).json_body(json!({ "posts": [], "total": 0 }));
        })
        .await;

    let client = client_for(&server);
    let _ = client.category("tech?limit=1").await;

    assert_eq!(split.hits_async().await, 0);
}
