#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use studentfeed::router::init_router;
use studentfeed::state::AppState;
use studentfeed_auth::issue_token;
use studentfeed_config::{CorsConfig, JwtConfig};
use studentfeed_db::Store;
use studentfeed_models::{NewStudent, NewStudentPost, Student, StudentPost};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiry_seconds: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    /// Sends one request and returns the status with the parsed JSON body
    /// (`Value::Null` when the body is not JSON).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, body)
    }

    pub fn token_for(&self, student_id: Uuid) -> String {
        issue_token(student_id, &self.jwt_config).unwrap()
    }

    /// Inserts a student directly into the store and returns it with a token.
    pub async fn create_student(&self, name: &str) -> (Student, String) {
        let student = self
            .store
            .students
            .create(NewStudent {
                name: name.to_string(),
                email: generate_unique_email(),
                age: None,
            })
            .await
            .unwrap();
        let token = self.token_for(student.id);
        (student, token)
    }

    pub async fn create_post(&self, student_id: Uuid, title: &str) -> StudentPost {
        self.store
            .posts
            .create(NewStudentPost {
                student_id,
                title: title.to_string(),
                content: format!("{} content", title),
            })
            .await
            .unwrap()
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Store::in_memory();
    let jwt_config = test_jwt_config();
    let state = AppState::new(
        store.clone(),
        jwt_config.clone(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
