use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use studentfeed_core::{ApiResponse, AppError, ErrorResponse};
use studentfeed_models::{LoginRequest, LoginResponse, RegisterRequest, Student};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a student account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered successfully", body = ApiResponse<Student>),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Student>>), AppError> {
    let student = AuthService::register(state.store.accounts.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(student))))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response =
        AuthService::login(state.store.accounts.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::success(response)))
}
