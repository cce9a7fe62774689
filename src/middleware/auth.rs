use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use studentfeed_auth::{Claims, INVALID_TOKEN, verify_token};
use studentfeed_config::JwtConfig;
use studentfeed_core::AppError;

use crate::state::AppState;

pub const NO_TOKEN: &str = "Access denied. No token provided.";

/// The authenticated identity of a request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The acting student's id.
    pub fn student_id(&self) -> Result<Uuid, AppError> {
        self.0.subject_id()
    }
}

/// Reads the token from `Authorization`. The scheme word is not checked:
/// the token is whatever follows the first run of whitespace.
fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized(NO_TOKEN.to_string()))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.split_whitespace().nth(1))
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN.to_string()))?;

    verify_token(token, jwt_config)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let claims = authenticate(&parts.headers, &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

/// Rejects the request with 401 unless it carries a valid token, and makes
/// the [`AuthUser`] available to handlers through the request extensions.
///
/// ```rust,ignore
/// init_students_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.jwt_config)?;
    tracing::debug!(sub = %claims.sub, "Authenticated request");

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}
