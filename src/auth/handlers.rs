use axum::{
    extract::{FromRef, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    activity::services::record_login,
    auth::{
        dto::{AuthResponse, LoginRequest, NicknameQuery, RefreshRequest, RegisterRequest},
        guard::AuthUser,
        jwt::JwtKeys,
    },
    error::{AppError, AppResult},
    state::AppState,
    users::{
        repo_types::{PublicUser, User},
        services as users,
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/nickname-suggestions", get(nickname_suggestions))
}

/// Routes that require a session.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(keys: &JwtKeys, user_id: Uuid) -> AppResult<(String, String)> {
    let access_token = keys.sign_access(user_id).map_err(AppError::Internal)?;
    let refresh_token = keys.sign_refresh(user_id).map_err(AppError::Internal)?;
    Ok((access_token, refresh_token))
}

fn auth_response(keys: &JwtKeys, user: User) -> AppResult<Json<AuthResponse>> {
    let (access_token, refresh_token) = issue_tokens(keys, user.id)?;
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = users::register(
        state.users.as_ref(),
        &payload.nickname,
        &payload.email,
        &payload.password,
        &payload.confirm_password,
    )
    .await?;

    info!(user_id = %user.id, nickname = %user.nickname, "user registered");
    auth_response(&JwtKeys::from_ref(&state), user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = users::authenticate(state.users.as_ref(), &payload.email, &payload.password).await?;
    record_login(state.activities.as_ref(), user.id).await?;

    info!(user_id = %user.id, "user logged in");
    auth_response(&JwtKeys::from_ref(&state), user)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::Unauthorized("Invalid or expired refresh token".into())
    })?;

    let user = users::find_user(state.users.as_ref(), claims.sub).await?;
    auth_response(&keys, user)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<PublicUser>> {
    let user = users::find_user(state.users.as_ref(), user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn nickname_suggestions(
    State(state): State<AppState>,
    Query(q): Query<NicknameQuery>,
) -> Json<Vec<String>> {
    Json(users::suggest_nicknames(state.users.as_ref(), &q.q).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn register_request_accepts_camel_case_confirmation() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"nickname":"ada","email":"a@b.co","password":"secret","confirmPassword":"secret"}"#,
        )
        .unwrap();
        assert_eq!(req.confirm_password, "secret");

        let partial: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert!(partial.nickname.is_empty());
    }

    #[test]
    fn auth_response_hides_password_hash() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let id = Uuid::new_v4();
        let user = User {
            id,
            nickname: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            total_score: 0,
            created_at: time::OffsetDateTime::now_utc(),
        };
        let Json(resp) = auth_response(&keys, user).unwrap();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("ada@example.com"));
        assert!(!json.contains("argon2"));
        assert_eq!(keys.verify(&resp.access_token).unwrap().sub, id);
        assert_eq!(keys.verify_refresh(&resp.refresh_token).unwrap().sub, id);
    }
}
