use tracing::{info, warn};
use uuid::Uuid;

use super::dto::QuizSubmission;
use super::engine::QuizEngine;
use crate::activity::{repo::ActivityRepository, services::record_quiz_completion};
use crate::error::{AppError, AppResult};
use crate::users::{repo::UserRepository, repo_types::User, services::increment_score};

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub user: User,
    pub awarded: i64,
}

/// Picks the points to award for a submission.
///
/// The client-computed `score` is authoritative when `trust_client_score`
/// is set (the legacy behaviour); otherwise the engine grades the answers.
/// A claim above the graded figure is logged but still honoured.
pub fn awarded_points(
    engine: &QuizEngine,
    submission: &QuizSubmission,
    trust_client_score: bool,
) -> AppResult<i64> {
    let graded = engine.score(&submission.answers);
    if !trust_client_score {
        return Ok(graded);
    }
    if submission.score < 0 {
        return Err(AppError::InvalidScore(submission.score));
    }
    if submission.score > graded {
        warn!(
            claimed = submission.score,
            graded,
            answers = submission.answers.len(),
            "client score exceeds server grading"
        );
    }
    Ok(submission.score)
}

/// Credits the user and appends a `quiz_completion` entry. The two writes
/// are independent statements.
pub async fn submit(
    users: &dyn UserRepository,
    activities: &dyn ActivityRepository,
    engine: &QuizEngine,
    trust_client_score: bool,
    user_id: Uuid,
    submission: &QuizSubmission,
) -> AppResult<SubmissionOutcome> {
    let awarded = awarded_points(engine, submission, trust_client_score)?;
    let user = increment_score(users, user_id, awarded).await?;
    record_quiz_completion(activities, user_id, awarded).await?;

    info!(user_id = %user_id, awarded, total = user.total_score, "quiz submitted");
    Ok(SubmissionOutcome { user, awarded })
}
