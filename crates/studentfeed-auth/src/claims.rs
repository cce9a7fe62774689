//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use studentfeed_core::AppError;

use crate::jwt::INVALID_TOKEN;

/// Claims carried by every access token.
///
/// - `sub`: the authenticated student's id
/// - `exp`: expiration timestamp (Unix seconds)
/// - `iat`: issued-at timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// The subject as a student id. A token whose subject is not a UUID is
    /// treated like any other invalid token.
    pub fn subject_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized(INVALID_TOKEN.to_string()))
    }
}
