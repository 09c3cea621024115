use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{LeaderboardResponse, RankedPlayer},
    services::{rankings, summarize_ranked},
};
use crate::{auth::guard::AuthUser, error::AppResult, state::AppState};

pub fn leaderboard_routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}

#[instrument(skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<LeaderboardResponse>> {
    let rows = rankings(state.users.as_ref(), state.activities.as_ref()).await?;
    let summary = summarize_ranked(&rows);

    let players = rows
        .into_iter()
        .enumerate()
        .map(|(i, (user, last_activity))| RankedPlayer {
            position: i + 1,
            id: user.id,
            nickname: user.nickname,
            total_score: user.total_score,
            last_activity,
        })
        .collect();

    Ok(Json(LeaderboardResponse { players, summary }))
}
