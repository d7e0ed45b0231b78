use blogdesk::application::endpoints::Endpoints;
use blogdesk::application::error::ApiError;
use blogdesk::application::repos::{BlogApi, LoginRequest, RegisterRequest};
use blogdesk::domain::posts::PostDraft;
use blogdesk::infra::http::HttpBlogApi;
use httpmock::MockServer;
use serde_json::json;

fn client(server: &MockServer) -> HttpBlogApi {
    let endpoints = Endpoints::new(&server.base_url()).expect("mock base url");
    HttpBlogApi::new(endpoints).expect("http client")
}

fn post_json(id: &str, title: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "body": "<p>body</p>",
        "tags": tags,
        "media": {"url": "https://img.example/x.jpg", "alt": "x"},
        "created": "2024-09-20T10:00:00.000Z",
        "updated": "2024-09-20T10:00:00.000Z",
        "author": {"name": "rikke", "email": "rikke@stud.noroff.no", "bio": null, "avatar": null, "banner": null}
    })
}

#[tokio::test]
async fn list_unwraps_data_envelope_and_sends_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/blog/posts/rikke")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(json!({
                "data": [post_json("1", "One", &["rust"]), post_json("2", "Two", &[])],
                "meta": {"isFirstPage": true, "isLastPage": true, "currentPage": 1}
            }));
        })
        .await;

    let posts = client(&server)
        .list_posts("rikke", None, Some("tok"))
        .await
        .expect("list posts");

    mock.assert_async().await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].tags, vec!["rust"]);
    assert_eq!(posts[0].image_url(), Some("https://img.example/x.jpg"));
}

#[tokio::test]
async fn tag_filter_is_sent_as_query_parameter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/blog/posts/rikkejuliane")
                .query_param("_tag", "rust");
            then.status(200)
                .json_body(json!({"data": [post_json("1", "One", &["rust"])]}));
        })
        .await;

    let posts = client(&server)
        .list_posts("rikkejuliane", Some("rust"), None)
        .await
        .expect("tagged posts");

    mock.assert_async().await;
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn error_status_carries_first_error_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("POST").path("/auth/register");
            then.status(400).json_body(json!({
                "errors": [{"message": "Profile already exists"}],
                "status": "Bad Request",
                "statusCode": 400
            }));
        })
        .await;

    let err = client(&server)
        .register(&RegisterRequest {
            name: "rikke".into(),
            email: "rikke@stud.noroff.no".into(),
            password: "password1".into(),
        })
        .await
        .expect_err("duplicate profile");

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.first_error_message(), Some("Profile already exists"));
    assert_eq!(err.api_message(), None);
}

#[tokio::test]
async fn top_level_message_is_kept_apart_from_errors_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("POST").path("/auth/login");
            then.status(401).json_body(json!({
                "message": "Invalid email or password",
                "errors": [{"message": "Invalid email or password provided"}],
                "statusCode": 401
            }));
        })
        .await;

    let err = client(&server)
        .login(&LoginRequest {
            email: "rikke@stud.noroff.no".into(),
            password: "wrong".into(),
        })
        .await
        .expect_err("bad credentials");

    assert_eq!(err.api_message(), Some("Invalid email or password"));
    assert_eq!(
        err.first_error_message(),
        Some("Invalid email or password provided")
    );
}

#[tokio::test]
async fn login_posts_credentials_and_reads_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/auth/login")
                .json_body(json!({"email": "rikke@stud.noroff.no", "password": "pw"}));
            then.status(200).json_body(json!({
                "data": {"name": "rikke", "email": "rikke@stud.noroff.no", "accessToken": "abc.def"}
            }));
        })
        .await;

    let profile = client(&server)
        .login(&LoginRequest {
            email: "rikke@stud.noroff.no".into(),
            password: "pw".into(),
        })
        .await
        .expect("login");

    mock.assert_async().await;
    assert_eq!(profile.access_token.as_deref(), Some("abc.def"));
}

#[tokio::test]
async fn update_puts_draft_to_item_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("PUT")
                .path("/blog/posts/rikke/42")
                .header("authorization", "Bearer tok")
                .json_body(json!({"title": "New", "body": "<p>b</p>", "tags": ["a"]}));
            then.status(200)
                .json_body(json!({"data": post_json("42", "New", &["a"])}));
        })
        .await;

    let draft = PostDraft::from_form("New", "<p>b</p>", "", "a");
    let post = client(&server)
        .update_post("rikke", "42", &draft, "tok")
        .await
        .expect("update");

    mock.assert_async().await;
    assert_eq!(post.id, "42");
}

#[tokio::test]
async fn delete_succeeds_only_on_no_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("DELETE").path("/blog/posts/rikke/gone");
            then.status(204);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("DELETE").path("/blog/posts/rikke/odd");
            then.status(200).json_body(json!({"data": {}}));
        })
        .await;

    let api = client(&server);
    api.delete_post("rikke", "gone", "tok")
        .await
        .expect("204 delete");

    let err = api
        .delete_post("rikke", "odd", "tok")
        .await
        .expect_err("200 is not a delete success");
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/blog/posts/rikke/1");
            then.status(200).body("not json");
        })
        .await;

    let err = client(&server)
        .get_post("rikke", "1", None)
        .await
        .expect_err("bad body");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let endpoints = Endpoints::new("http://127.0.0.1:9").expect("base");
    let api = HttpBlogApi::new(endpoints).expect("client");

    let err = api
        .list_posts("rikke", None, None)
        .await
        .expect_err("nothing listens on the discard port");
    assert!(err.is_network());
}
