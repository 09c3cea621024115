use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::ProfileResponse,
    services::{localize, recent, PROFILE_ACTIVITY_LIMIT},
};
use crate::{auth::guard::AuthUser, error::AppResult, state::AppState, users};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = users::services::find_user(state.users.as_ref(), user_id).await?;
    let activities = recent(state.activities.as_ref(), user_id, PROFILE_ACTIVITY_LIMIT).await?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        activities: localize(activities, state.config.display_offset()),
    }))
}
