use crate::modules::student_posts::controller::{
    create_student_post, delete_student_post, get_student_post, get_student_posts,
    update_student_post,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Reads are public; writes authenticate through the `AuthUser` extractor.
pub fn init_student_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student_post).get(get_student_posts))
        .route(
            "/{id}",
            get(get_student_post)
                .put(update_student_post)
                .delete(delete_student_post),
        )
}
