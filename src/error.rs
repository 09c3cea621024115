use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("score {0} cannot be added to the total")]
    InvalidScore(i64),
    #[error("a user with this email already exists")]
    DuplicateEmail,
    #[error("this nickname is already taken")]
    DuplicateNickname,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(String),
    #[error("city not found")]
    CityNotFound,
    #[error("weather service unavailable: {0}")]
    Upstream(String),
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::WeakPassword { .. }
            | AppError::PasswordMismatch
            | AppError::InvalidScore(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail | AppError::DuplicateNickname => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::CityNotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Repositories speak `anyhow`; typed errors they raise (e.g. unique
/// violations) survive the round trip, anything else is a storage failure.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<AppError>() {
            Ok(app) => app,
            Err(e) => AppError::Storage(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // internals stay in the log
            AppError::Storage(e) => {
                error!(error = %format!("{e:#}"), "storage failure");
                "internal storage error".to_string()
            }
            AppError::Internal(e) => {
                error!(error = %format!("{e:#}"), "internal failure");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_survive_anyhow_round_trip() {
        let e: anyhow::Error = AppError::DuplicateNickname.into();
        assert!(matches!(AppError::from(e), AppError::DuplicateNickname));
    }

    #[test]
    fn foreign_errors_become_storage() {
        let e = anyhow::anyhow!("connection refused");
        let app = AppError::from(e);
        assert!(matches!(app, AppError::Storage(_)));
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(AppError::WeakPassword { min: 6 }.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::CityNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
    }
}
