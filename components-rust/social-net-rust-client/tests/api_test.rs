use common_lib::domain::common::UpdateProfile;
use common_lib::validation::RegisterForm;
use common_lib::{Attachment, Gender, ValidationError};
use serde_json::{json, Value};
use social_net_rust_client::notify::{Notification, RecordingNotifier};
use social_net_rust_client::session::{MemorySessionStore, SessionStore};
use social_net_rust_client::store::Resource;
use social_net_rust_client::{
    AuthApi, ClientConfig, ClientError, CommentApi, NewPost, PostApi, ProfileApi, SocialClient,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    client: SocialClient,
    session: Arc<MemorySessionStore>,
    notifier: Arc<RecordingNotifier>,
}

fn fixture(base_url: &str, token: Option<&str>) -> Fixture {
    let session = Arc::new(token.map(MemorySessionStore::with_token).unwrap_or_default());
    let notifier = Arc::new(RecordingNotifier::default());
    let config = ClientConfig::default().with_base_url(base_url);
    let client = SocialClient::with_parts(config, session.clone(), notifier.clone()).unwrap();
    Fixture {
        client,
        session,
        notifier,
    }
}

fn user_json(id: &str, name: &str) -> Value {
    json!({"_id": id, "name": name, "photo": format!("uploads/{id}.png")})
}

fn post_json(id: &str, created_at: &str) -> Value {
    json!({
        "_id": id,
        "body": format!("post {id}"),
        "user": user_json("u1", "Ann"),
        "createdAt": created_at,
        "comments": []
    })
}

fn comment_json(id: &str, post_id: &str, content: &str) -> Value {
    json!({
        "_id": id,
        "content": content,
        "commentCreator": user_json("u2", "Bob"),
        "post": post_id,
        "createdAt": "2024-05-01T12:00:00.000Z"
    })
}

#[tokio::test]
async fn login_persists_token_and_replays_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .and(body_json(json!({"email": "ann@test.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "token": "tok-1",
            "user": user_json("u1", "Ann")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/profile-data"))
        .and(header("token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": {"_id": "u1", "name": "Ann", "email": "ann@test.com", "gender": "female"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    assert!(!f.client.is_authenticated());

    let user = f.client.login("ann@test.com", "secret1").await.unwrap();
    assert_eq!(user.unwrap().user_id, "u1");
    assert!(f.client.is_authenticated());
    assert_eq!(f.session.load().unwrap().token.as_deref(), Some("tok-1"));
    assert!(f.client.status(Resource::Auth).success);

    let profile = f.client.get_profile().await.unwrap();
    assert_eq!(profile.email.as_deref(), Some("ann@test.com"));
    assert_eq!(f.session.load().unwrap().username.as_deref(), Some("Ann"));
    assert_eq!(
        f.client.state().profile.user.map(|u| u.name),
        Some("Ann".to_string())
    );
    assert_eq!(
        f.notifier.drain(),
        vec![Notification::Success("Login successful".to_string())]
    );
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"message": "incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    let err = f.client.login("ann@test.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "incorrect email or password");
    assert_eq!(err.status(), Some(400));
    assert!(!f.client.is_authenticated());
    let status = f.client.status(Resource::Auth);
    assert!(!status.loading);
    assert_eq!(status.error.as_deref(), Some("incorrect email or password"));
    assert_eq!(
        f.notifier.drain(),
        vec![Notification::Error("incorrect email or password".to_string())]
    );
}

#[tokio::test]
async fn success_status_with_failure_message_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "user already exists"})))
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    let form = RegisterForm {
        name: "Ann".to_string(),
        email: "ann@test.com".to_string(),
        password: "secret1".to_string(),
        re_password: "secret1".to_string(),
        gender: "female".to_string(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1994, 10, 7),
    };

    let err = f.client.register(&form).await.unwrap_err();
    assert_eq!(err.to_string(), "user already exists");
    assert!(!f.client.is_authenticated());
}

#[tokio::test]
async fn register_sends_formatted_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signup"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@test.com",
            "password": "secret1",
            "rePassword": "secret1",
            "dateOfBirth": "1994-10-07",
            "gender": "female"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    let form = RegisterForm {
        name: " Ann ".to_string(),
        email: "ann@test.com".to_string(),
        password: "secret1".to_string(),
        re_password: "secret1".to_string(),
        gender: "Female".to_string(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1994, 10, 7),
    };

    f.client.register(&form).await.unwrap();
    assert!(!f.client.is_authenticated());
}

#[tokio::test]
async fn list_posts_sorts_newest_first_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "paginationInfo": {"currentPage": 2, "numberOfPages": 4, "limit": 10, "total": 35},
            "posts": [
                post_json("old", "2024-01-01T00:00:00.000Z"),
                post_json("new", "2024-03-01T00:00:00.000Z"),
                post_json("mid", "2024-02-01T00:00:00.000Z")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    let page = f.client.list_posts(2, 10).await.unwrap();

    let ids: Vec<_> = page.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);

    let state = f.client.state();
    assert_eq!(state.posts.total_pages, 4);
    assert_eq!(state.posts.total_posts, 35);
    assert_eq!(state.posts.current_page, 2);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("token").is_none());
}

#[tokio::test]
async fn transport_failure_uses_fallback_message() {
    let f = fixture("http://127.0.0.1:9", Some("tok"));
    let err = f.client.list_posts(1, 10).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch posts");
    assert_eq!(err.status(), None);
    assert_eq!(
        f.client.status(Resource::Posts).error.as_deref(),
        Some("Failed to fetch posts")
    );
}

#[tokio::test]
async fn create_post_requires_token_and_sends_nothing() {
    let server = MockServer::start().await;
    let f = fixture(&server.uri(), None);

    let err = f
        .client
        .create_post(NewPost::text("hello"))
        .await
        .unwrap_err();

    assert!(err.is_authentication_required());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(
        f.notifier.drain(),
        vec![Notification::Error("Authentication required".to_string())]
    );
    assert_eq!(
        f.client.status(Resource::CreatePost).error.as_deref(),
        Some("Authentication required")
    );
}

#[tokio::test]
async fn invalid_post_is_rejected_locally() {
    let server = MockServer::start().await;
    let f = fixture(&server.uri(), Some("tok"));

    let err = f.client.create_post(NewPost::text("   ")).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::Required("Post content"))
    ));

    let image = Attachment::new("doc.pdf", vec![1, 2, 3]);
    let err = f
        .client
        .create_post(NewPost::text("hi").with_image(image))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::UnsupportedImageType)
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_post_uploads_multipart_and_prepends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(header("token", "tok"))
        .and(body_string_contains("name=\"body\""))
        .and(body_string_contains("hello world"))
        .and(body_string_contains("name=\"image\"; filename=\"cat.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "success",
            "post": post_json("p9", "2024-06-01T00:00:00.000Z")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    let post = NewPost::text("  hello world ").with_image(Attachment::new("cat.png", vec![7; 32]));
    let created = f.client.create_post(post).await.unwrap();

    assert_eq!(created.unwrap().post_id, "p9");
    let state = f.client.state();
    assert_eq!(state.posts.posts[0].post_id, "p9");
    assert_eq!(state.posts.total_posts, 1);
    assert!(f.client.status(Resource::CreatePost).success);
    assert_eq!(
        f.notifier.drain(),
        vec![Notification::Success("Post created successfully!".to_string())]
    );
}

#[tokio::test]
async fn edit_and_delete_post_update_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "paginationInfo": {"currentPage": 1, "numberOfPages": 1, "limit": 10, "total": 2},
            "posts": [
                post_json("a", "2024-01-01T00:00:00.000Z"),
                post_json("b", "2024-01-02T00:00:00.000Z")
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/posts/a"))
        .and(body_json(json!({"body": "edited"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/b"))
        .and(header("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    f.client.list_posts(1, 10).await.unwrap();

    f.client.update_post("a", " edited ").await.unwrap();
    f.client.delete_post("b").await.unwrap();

    let state = f.client.state();
    assert_eq!(state.posts.posts.len(), 1);
    assert_eq!(state.posts.posts[0].body, "edited");
    assert_eq!(state.posts.total_posts, 1);
}

#[tokio::test]
async fn delete_failure_keeps_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/x"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "not your post"})))
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    let err = f.client.delete_post("x").await.unwrap_err();
    assert_eq!(err.to_string(), "not your post");
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn open_post_fetches_post_and_comments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "post": post_json("p1", "2024-01-01T00:00:00.000Z")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/p1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "comments": [comment_json("c1", "p1", "first"), comment_json("c2", "p1", "second")]
        })))
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    let (post, comments) = f.client.open_post("p1").await.unwrap();

    assert_eq!(post.post_id, "p1");
    assert_eq!(comments.len(), 2);
    assert_eq!(post.comments.len(), 2);
    let state = f.client.state();
    assert_eq!(state.posts.single_post.as_ref().unwrap().comments.len(), 2);
    assert_eq!(state.comments_for("p1").len(), 2);
}

#[tokio::test]
async fn comment_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({"content": "nice post", "post": "p1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "success",
            "comments": [comment_json("c1", "p1", "nice post")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/comments/c1"))
        .and(body_json(json!({"content": "great post"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "comment": {"_id": "c1", "content": "great post", "commentCreator": "u2",
                        "post": "p1", "createdAt": "2024-05-01T12:00:00.000Z"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/comments/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));

    let err = f.client.create_comment("p1", "x").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let comments = f.client.create_comment("p1", " nice post ").await.unwrap();
    assert_eq!(comments.len(), 1);

    let updated = f.client.update_comment("c1", "great post").await.unwrap();
    assert_eq!(updated.unwrap().content, "great post");
    let cached = f.client.state().comments_for("p1");
    assert_eq!(cached[0].content, "great post");
    // author details from the original listing survive the edit
    assert_eq!(
        cached[0].comment_creator.as_ref().map(|u| u.name.as_str()),
        Some("Bob")
    );

    f.client.delete_comment("c1").await.unwrap();
    assert!(f.client.state().comments_for("p1").is_empty());
}

#[tokio::test]
async fn my_posts_resolve_the_profile_and_append_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profile-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": user_json("u1", "Ann")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/u1/posts"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "paginationInfo": {"currentPage": 1, "numberOfPages": 2, "limit": 1, "total": 2},
            "posts": [post_json("a", "2024-01-02T00:00:00.000Z")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/u1/posts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "paginationInfo": {"currentPage": 2, "numberOfPages": 2, "limit": 1, "total": 2},
            "posts": [post_json("b", "2024-01-01T00:00:00.000Z")]
        })))
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    f.client.my_posts(1, 1).await.unwrap();
    let page = f.client.my_posts(2, 1).await.unwrap();

    let ids: Vec<_> = page.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    let my_posts = f.client.state().user_posts.my_posts;
    assert_eq!(my_posts.current_page, 2);
    assert_eq!(my_posts.total_count, 2);
}

#[tokio::test]
async fn profile_photo_upload_and_removal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profile-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": user_json("u1", "Ann")
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/upload-photo"))
        .and(body_string_contains("name=\"photo\"; filename=\"me.jpg\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": {"_id": "u1", "name": "Ann", "photo": "https://cdn.example.com/me.jpg"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/profile-photo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));
    f.client.get_profile().await.unwrap();

    let err = f
        .client
        .upload_photo(Attachment::new("me.txt", vec![1]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::NotAnImage)
    ));

    let url = f
        .client
        .upload_photo(Attachment::new("me.jpg", vec![1; 64]))
        .await
        .unwrap();
    assert_eq!(url.as_deref(), Some("https://cdn.example.com/me.jpg"));
    assert_eq!(
        f.client.state().profile.user.and_then(|u| u.photo).as_deref(),
        Some("https://cdn.example.com/me.jpg")
    );

    f.client.delete_photo().await.unwrap();
    assert_eq!(f.client.state().profile.user.and_then(|u| u.photo), None);
}

#[tokio::test]
async fn change_password_replaces_token() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/change-password"))
        .and(header("token", "old-token"))
        .and(body_json(json!({"password": "Old!pass1", "newPassword": "New!pass1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "token": "new-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("old-token"));
    f.client
        .change_password("Old!pass1", "New!pass1")
        .await
        .unwrap();

    assert_eq!(f.session.load().unwrap().token.as_deref(), Some("new-token"));
    assert_eq!(f.client.state().auth.token.as_deref(), Some("new-token"));
}

#[tokio::test]
async fn logout_clears_session_and_store() {
    let f = fixture("http://127.0.0.1:9", Some("tok"));
    assert!(f.client.is_authenticated());

    f.client.logout().unwrap();
    assert!(!f.client.is_authenticated());
    assert_eq!(f.session.load().unwrap().token, None);
    assert!(f.client.state().profile.user.is_none());
}

#[tokio::test]
async fn login_as_another_user_switches_my_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .and(body_json(json!({"email": "ann@test.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "token": "tok-a",
            "user": user_json("ua", "Ann")
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .and(body_json(json!({"email": "bob@test.com", "password": "secret2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "token": "tok-b",
            "user": user_json("ub", "Bob")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/profile-data"))
        .and(header("token", "tok-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": user_json("ua", "Ann")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/ua/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "posts": [post_json("a1", "2024-01-01T00:00:00.000Z")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/ub/posts"))
        .and(header("token", "tok-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "posts": [post_json("b1", "2024-01-02T00:00:00.000Z")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    f.client.login("ann@test.com", "secret1").await.unwrap();
    f.client.get_profile().await.unwrap();
    f.client.my_posts(1, 10).await.unwrap();

    f.client.login("bob@test.com", "secret2").await.unwrap();
    assert!(f.client.state().profile.user.is_none());

    let page = f.client.my_posts(1, 10).await.unwrap();
    let ids: Vec<_> = page.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["b1"]);
}

#[tokio::test]
async fn latest_posts_are_cached_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("sort", "-createdAt"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "posts": [
                post_json("old", "2024-01-01T00:00:00.000Z"),
                post_json("new", "2024-03-01T00:00:00.000Z")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), None);
    let latest = f.client.latest_posts(5).await.unwrap();

    let ids: Vec<_> = latest.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
    let cached = f.client.state().posts.latest_posts;
    assert_eq!(cached[0].post_id, "new");
    assert!(f.client.state().posts.posts.is_empty());
}

#[tokio::test]
async fn update_profile_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/profile-data"))
        .and(header("token", "tok"))
        .and(body_json(json!({"name": "Ann B", "gender": "female"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "user": {"_id": "u1", "name": "Ann B", "gender": "female"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server.uri(), Some("tok"));

    let err = f
        .client
        .update_profile(&UpdateProfile::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::NothingToUpdate)
    ));
    f.notifier.drain();

    let update = UpdateProfile {
        name: Some("Ann B".to_string()),
        gender: Some(Gender::Female),
        ..UpdateProfile::default()
    };
    let user = f.client.update_profile(&update).await.unwrap();

    assert_eq!(user.name, "Ann B");
    assert_eq!(
        f.client.state().profile.user.map(|u| u.name),
        Some("Ann B".to_string())
    );
    assert_eq!(
        f.notifier.drain(),
        vec![Notification::Success("Profile updated successfully".to_string())]
    );
}

#[tokio::test]
async fn user_posts_need_a_token_and_are_cached_per_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u7/posts"))
        .and(header("token", "tok"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "paginationInfo": {"currentPage": 1, "numberOfPages": 3, "limit": 5, "total": 12},
            "posts": [post_json("x", "2024-01-01T00:00:00.000Z")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let anonymous = fixture(&server.uri(), None);
    let err = anonymous.client.user_posts("u7", 1, 5).await.unwrap_err();
    assert!(err.is_authentication_required());
    assert!(server.received_requests().await.unwrap().is_empty());

    let f = fixture(&server.uri(), Some("tok"));
    let page = f.client.user_posts("u7", 1, 5).await.unwrap();
    assert_eq!(page.posts.len(), 1);

    let state = f.client.state();
    let cached = &state.user_posts.by_user["u7"];
    assert_eq!(cached.posts[0].post_id, "x");
    assert_eq!(cached.total_pages, 3);
    assert_eq!(cached.total_count, 12);
    assert!(state.user_posts.my_posts.posts.is_empty());
}
