mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{TEST_SECRET, setup_test_app};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use studentfeed_auth::{Claims, issue_token};
use studentfeed_config::JwtConfig;
use uuid::Uuid;

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = setup_test_app();

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@x.com",
                "age": 21,
                "password": "correct-horse"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ada@x.com");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
    let student_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@x.com", "password": "correct-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 3600);
    assert_eq!(body["data"]["student"]["id"], student_id);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/studentposts",
            Some(&token),
            Some(json!({ "title": "Hi", "content": "From a logged in student" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["student"]["id"], student_id);
}

#[tokio::test]
async fn test_register_duplicate_and_invalid() {
    let app = setup_test_app();
    let payload = json!({ "name": "Ada", "email": "ada@x.com", "password": "correct-horse" });

    let (status, _) = app
        .send("POST", "/api/auth/register", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send("POST", "/api/auth/register", None, Some(payload))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Student with email ada@x.com already exists");

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "Bob", "email": "bob@x.com", "password": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password must be at least 8 characters");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = setup_test_app();
    app.send(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Ada", "email": "ada@x.com", "password": "correct-horse" })),
    )
    .await;

    for (email, password) in [("ada@x.com", "wrong-horse"), ("nobody@x.com", "correct-horse")] {
        let (status, body) = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = setup_test_app();

    for header in ["Bearer", "Bearer not-a-jwt", "garbage"] {
        let request = Request::builder()
            .method("GET")
            .uri("/api/students")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();

        let (status, body) = app.send_request(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(body["message"], "Invalid token.");
    }
}

#[tokio::test]
async fn test_any_scheme_word_is_accepted() {
    let app = setup_test_app();
    let (_, token) = app.create_student("Ada").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students")
        .header("authorization", format!("JWT {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, _) = app.send_request(request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let app = setup_test_app();
    let (student, _) = app.create_student("Ada").await;
    let forged = issue_token(
        student.id,
        &JwtConfig {
            secret: "some-other-secret".to_string(),
            expiry_seconds: 3600,
        },
    )
    .unwrap();

    let (status, body) = app.send("GET", "/api/students", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = setup_test_app();
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/studentposts",
            Some(&expired),
            Some(json!({ "title": "t", "content": "c" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_health_and_docs() {
    let app = setup_test_app();

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = app.send("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/studentposts"].is_object());
}
