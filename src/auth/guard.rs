use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use super::{claims::TokenKind, jwt::JwtKeys};
use crate::{error::AppError, state::AppState};

/// Authenticated session, placed in request extensions by [`require_session`].
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header".into()))
}

/// Guard for the protected router: only requests carrying a valid access
/// token reach the handlers.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let keys = JwtKeys::from_ref(&state);

    let claims = keys.verify(bearer_token(&parts)?).map_err(|_| {
        warn!(uri = %parts.uri, "invalid or expired token");
        AppError::Unauthorized("Invalid or expired token".into())
    })?;
    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized("Access token required".into()));
    }

    parts.extensions.insert(Session {
        user_id: claims.sub,
    });
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// The current session's user id. Only valid behind [`require_session`].
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .map(|s| AuthUser(s.user_id))
            .ok_or_else(|| AppError::Unauthorized("Login required".into()))
    }
}
