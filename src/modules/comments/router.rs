use crate::modules::comments::controller::{create_comment, delete_comment, get_comments};
use crate::state::AppState;
use axum::{Router, routing::get};

/// GET and POST take a post id, DELETE takes a comment id. They share one
/// route because the router cannot tell the two parameters apart.
pub fn init_comments_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(get_comments).post(create_comment).delete(delete_comment),
    )
}
