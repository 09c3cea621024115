use serde::{Deserialize, Serialize};

use super::engine::SubmittedAnswer;

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizInfo {
    pub catalog_size: usize,
    pub session_size: usize,
}

/// Body of `POST /quiz/submit`. `score` is the client's own tally.
#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub total_score: i64,
    pub message: String,
}
