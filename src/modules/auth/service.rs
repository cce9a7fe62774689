use anyhow::{Context, anyhow};
use tracing::instrument;

use studentfeed_auth::issue_token;
use studentfeed_config::JwtConfig;
use studentfeed_core::{AppError, hash_password, verify_password};
use studentfeed_db::AccountRepository;
use studentfeed_models::{LoginRequest, LoginResponse, RegisterRequest, Student};

use crate::modules::students::service::map_email_write_error;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Creates a student and its login account in one step.
    #[instrument(skip(repo, dto), fields(email = %dto.email))]
    pub async fn register(
        repo: &dyn AccountRepository,
        dto: RegisterRequest,
    ) -> Result<Student, AppError> {
        let (new_student, password) = dto.into_parts();
        let email = new_student.email.clone();
        let password_hash = hash_password(&password)?;

        let student = repo
            .register(new_student, password_hash)
            .await
            .map_err(|e| map_email_write_error(e, &email, "Failed to register student"))?;

        tracing::info!(student_id = %student.id, "Student registered");
        Ok(student)
    }

    #[instrument(skip(repo, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        repo: &dyn AccountRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = repo
            .find_credentials(&dto.email)
            .await
            .context("Failed to log in")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&dto.password, &credentials.password_hash)? {
            tracing::warn!("Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = issue_token(credentials.student.id, jwt_config)
            .map_err(|e| AppError::internal(e.error.context("Failed to issue token")))?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.expiry_seconds,
            student: credentials.student,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use studentfeed_auth::verify_token;
    use studentfeed_db::MemoryStore;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "auth-service-test-secret".to_string(),
            expiry_seconds: 600,
        }
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            age: Some(21),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let student = AuthService::register(&store, register_request("ada@x.com"))
            .await
            .unwrap();

        let response = AuthService::login(
            &store,
            LoginRequest {
                email: "ada@x.com".to_string(),
                password: "correct-horse".to_string(),
            },
            &jwt_config(),
        )
        .await
        .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 600);
        assert_eq!(response.student, student);
        let claims = verify_token(&response.access_token, &jwt_config()).unwrap();
        assert_eq!(claims.subject_id().unwrap(), student.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        AuthService::register(&store, register_request("ada@x.com"))
            .await
            .unwrap();

        let err = AuthService::register(&store, register_request("ada@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message(), "Student with email ada@x.com already exists");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email() {
        let store = MemoryStore::new();
        AuthService::register(&store, register_request("ada@x.com"))
            .await
            .unwrap();

        for (email, password) in [("ada@x.com", "wrong-password"), ("bob@x.com", "whatever1")] {
            let err = AuthService::login(
                &store,
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                &jwt_config(),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
    }
}
