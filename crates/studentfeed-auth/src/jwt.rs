//! Issuing and verifying HS256 bearer tokens.
//!
//! Both functions are pure over the secret in [`JwtConfig`]; there is no
//! process-wide secret and no fallback value.
//!
//! ```ignore
//! let token = issue_token(student.id, &state.jwt_config)?;
//! let claims = verify_token(&token, &state.jwt_config)?;
//! assert_eq!(claims.subject_id()?, student.id);
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use studentfeed_config::JwtConfig;
use studentfeed_core::AppError;

use crate::claims::Claims;

pub const INVALID_TOKEN: &str = "Invalid token.";

/// Signs a token for `subject_id` that expires after `jwt_config.expiry_seconds`.
pub fn issue_token(subject_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: subject_id.to_string(),
        exp: now + jwt_config.expiry_seconds as usize,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

pub(crate) fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Validates signature and expiry. Every failure (malformed, forged, expired)
/// is the same 401 so callers learn nothing about why a token was refused.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN.to_string()))
}
