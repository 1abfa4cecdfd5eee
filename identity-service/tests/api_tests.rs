mod common;

use common::TestApp;
use common::TOKEN_TTL_MINUTES;
use reqwest::StatusCode;

async fn body_json(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "alice@example.com", "p@ss1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(
        body["message"],
        format!("Token will be expired within {} minutes", TOKEN_TTL_MINUTES)
    );

    let token = body["data"].as_str().expect("token is a string");
    let claims = app.token_issuer.parse(token).expect("Failed to parse token");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.display_name, "Test User");
    assert_eq!(claims.role_id, common::default_role().0);
    assert_eq!(claims.permissions, vec!["category.read", "post.read"]);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("alice", "alice@example.com", "p@ss1").await;

    let response = app.register("alice", "other@example.com", "p@ss2").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("alice", "alice@example.com", "p@ss1").await;

    let response = app.register("alice2", "alice@example.com", "p@ss2").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app.register("a", "alice@example.com", "p@ss1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "not-an-email", "p@ss1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .form(&[("username", "alice"), ("password", "p@ss1")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], false);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_success_by_username_and_email() {
    let app = TestApp::spawn().await;

    let registered = body_json(app.register("alice", "alice@example.com", "p@ss1").await).await;
    let registered_claims = app
        .token_issuer
        .parse(registered["data"].as_str().unwrap())
        .unwrap();

    for identifier in ["alice", "alice@example.com"] {
        let response = app.login(identifier, "p@ss1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], true);

        let claims = app
            .token_issuer
            .parse(body["data"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.subject_id, registered_claims.subject_id);
        assert_eq!(claims.permissions, registered_claims.permissions);
    }
}

#[tokio::test]
async fn test_login_accepts_username_or_email_field() {
    let app = TestApp::spawn().await;

    app.register("alice", "alice@example.com", "p@ss1").await;

    let response = app
        .post("/api/v1/auth/login")
        .form(&[("username_or_email", "alice"), ("password", "p@ss1")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::spawn().await;

    app.register("alice", "alice@example.com", "Correct_Password!")
        .await;

    let wrong_password = app.login("alice", "Wrong_Password!").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown_user = app.login("nobody", "Wrong_Password!").await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user = body_json(unknown_user).await;

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["status"], false);
    assert_eq!(wrong_password["message"], "Authentication failed");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = TestApp::spawn().await;

    let body = body_json(app.register("alice", "alice@example.com", "p@ss1").await).await;
    let token = body["data"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["user_id"].is_string());
    assert!(body["data"]["exp"].is_i64());
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["status"], false);
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = TestApp::spawn().await;

    let body = body_json(app.register("alice", "alice@example.com", "p@ss1").await).await;
    let token = body["data"].as_str().unwrap();

    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

    let response = app
        .get_authenticated("/api/v1/auth/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Unauthorized");
}

#[tokio::test]
async fn test_me_with_token_from_other_key() {
    let app = TestApp::spawn().await;

    let body = body_json(app.register("alice", "alice@example.com", "p@ss1").await).await;
    let claims = app
        .token_issuer
        .parse(body["data"].as_str().unwrap())
        .unwrap();

    let foreign = auth::TokenIssuer::new(b"another-secret-key-for-jwt-signing-32-bytes")
        .unwrap()
        .issue(&claims)
        .unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/me", &foreign)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_and_login_with_multipart_form() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Alice")
        .text("username", "alice")
        .text("email", "alice@example.com")
        .text("password", "p@ss1");

    let response = app
        .post("/api/v1/auth/register")
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let claims = app
        .token_issuer
        .parse(body["data"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.display_name, "Alice");

    let form = reqwest::multipart::Form::new()
        .text("username_or_email", "alice@example.com")
        .text("password", "p@ss1");

    let response = app
        .post("/api/v1/auth/login")
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_multipart_missing_field() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new()
        .text("username", "alice")
        .text("password", "p@ss1");

    let response = app
        .post("/api/v1/auth/register")
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], false);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_with_both_identifier_fields() {
    let app = TestApp::spawn().await;

    app.register("alice", "alice@example.com", "p@ss1").await;

    let response = app
        .post("/api/v1/auth/login")
        .form(&[
            ("username", "alice"),
            ("username_or_email", "nobody"),
            ("password", "p@ss1"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
