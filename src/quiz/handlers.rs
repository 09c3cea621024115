use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{QuestionsQuery, QuizInfo, QuizSubmission, SubmitResponse},
    engine::Question,
    services::submit,
};
use crate::{
    activity::services::record_quiz_view, auth::guard::AuthUser, error::AppResult,
    state::AppState,
};

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/quiz", get(open_quiz))
        .route("/quiz/questions", get(get_questions))
        .route("/quiz/submit", post(submit_quiz))
}

#[instrument(skip(state))]
pub async fn open_quiz(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<QuizInfo>> {
    record_quiz_view(state.activities.as_ref(), user_id).await?;
    Ok(Json(QuizInfo {
        catalog_size: state.quiz.catalog_size(),
        session_size: state.quiz.session_size(),
    }))
}

#[instrument(skip(state))]
pub async fn get_questions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<QuestionsQuery>,
) -> Json<Vec<Question>> {
    let count = q.count.unwrap_or_else(|| state.quiz.session_size());
    Json(state.quiz.draw_session(count))
}

#[instrument(skip(state, payload))]
pub async fn submit_quiz(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<QuizSubmission>,
) -> AppResult<Json<SubmitResponse>> {
    let outcome = submit(
        state.users.as_ref(),
        state.activities.as_ref(),
        &state.quiz,
        state.config.quiz.trust_client_score,
        user_id,
        &payload,
    )
    .await?;

    Ok(Json(SubmitResponse {
        success: true,
        total_score: outcome.user.total_score,
        message: format!("Quiz completed! You scored {} points.", outcome.awarded),
    }))
}
