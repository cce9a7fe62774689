//! Comment models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /comments/{postId}`.
///
/// Both fields are optional at the serde level so that a missing field and
/// a blank one produce the same "Author and content are required" error.
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct CreateCommentDto {
    pub author: Option<String>,
    pub content: Option<String>,
}

impl CreateCommentDto {
    /// Returns `(author, content)` when both are present and not blank.
    pub fn required_fields(self) -> Option<(String, String)> {
        let author = self.author.filter(|s| !s.trim().is_empty())?;
        let content = self.content.filter(|s| !s.trim().is_empty())?;
        Some((author, content))
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author: String,
    pub content: String,
}
