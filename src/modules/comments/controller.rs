use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_core::{ApiResponse, AppError, ErrorResponse, MessageResponse, parse_id};
use studentfeed_models::{Comment, CreateCommentDto};

use crate::middleware::auth::AuthUser;
use crate::modules::comments::service::CommentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/comments/{postId}",
    params(
        ("postId" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Comments on the post, oldest first", body = ApiResponse<Vec<Comment>>),
        (status = 400, description = "Invalid postId format", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, AppError> {
    let comments = CommentService::get_comments_for_post(&state.store, &post_id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

#[utoipa::path(
    post,
    path = "/api/comments/{postId}",
    params(
        ("postId" = Uuid, Path, description = "Post ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created successfully", body = ApiResponse<Comment>),
        (status = 400, description = "Missing fields or invalid postId format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_comment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), AppError> {
    let comment = CommentService::create_comment(&state.store, &post_id, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_comment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    CommentService::delete_comment(&state.store, id).await?;
    Ok(Json(MessageResponse::success("Comment deleted successfully")))
}
