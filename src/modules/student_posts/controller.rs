use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_core::{ApiResponse, AppError, ErrorResponse, MessageResponse, parse_id};
use studentfeed_models::{CreateStudentPostDto, StudentPost, UpdateStudentPostDto};

use crate::middleware::auth::AuthUser;
use crate::modules::student_posts::service::StudentPostService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/studentposts",
    request_body = CreateStudentPostDto,
    responses(
        (status = 201, description = "Student post created successfully", body = ApiResponse<StudentPost>),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Authenticated student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student Posts"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_student_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentPostDto>,
) -> Result<(StatusCode, Json<ApiResponse<StudentPost>>), AppError> {
    let student_id = auth_user.student_id()?;
    let post = StudentPostService::create_post(&state.store, student_id, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post))))
}

#[utoipa::path(
    get,
    path = "/api/studentposts",
    responses(
        (status = 200, description = "All posts, newest first", body = ApiResponse<Vec<StudentPost>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Student Posts"
)]
#[instrument(skip(state))]
pub async fn get_student_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StudentPost>>>, AppError> {
    let posts = StudentPostService::get_posts(&state.store).await?;
    Ok(Json(ApiResponse::success(posts)))
}

#[utoipa::path(
    get,
    path = "/api/studentposts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post details", body = ApiResponse<StudentPost>),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Student Posts"
)]
#[instrument(skip(state))]
pub async fn get_student_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StudentPost>>, AppError> {
    let id = parse_id(&id, "id")?;
    let post = StudentPostService::get_post_by_id(&state.store, id).await?;
    Ok(Json(ApiResponse::success(post)))
}

#[utoipa::path(
    put,
    path = "/api/studentposts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    request_body = UpdateStudentPostDto,
    responses(
        (status = 200, description = "Student post updated successfully", body = ApiResponse<StudentPost>),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student Posts"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_student_post(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentPostDto>,
) -> Result<Json<ApiResponse<StudentPost>>, AppError> {
    let id = parse_id(&id, "id")?;
    let post = StudentPostService::update_post(&state.store, id, dto).await?;
    Ok(Json(ApiResponse::success(post)))
}

#[utoipa::path(
    delete,
    path = "/api/studentposts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Student post deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Student Posts"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_student_post(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    StudentPostService::delete_post(&state.store, id).await?;
    Ok(Json(MessageResponse::success(
        "Student post deleted successfully",
    )))
}
