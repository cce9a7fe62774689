//! Path identifier parsing.
//!
//! Identifiers arrive as raw path segments and are parsed before any store
//! access, so a malformed id is always a 400 and never reaches the database.

use uuid::Uuid;

use crate::AppError;

/// Parses `raw` as a UUID, naming the path parameter in the error message.
///
/// ```ignore
/// let post_id = parse_id(&raw, "postId")?; // 400 "Invalid postId format"
/// ```
pub fn parse_id(raw: &str, param: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid {} format", param)))
}
