use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::services::Summary;

#[derive(Debug, Serialize)]
pub struct RankedPlayer {
    pub position: usize,
    pub id: Uuid,
    pub nickname: String,
    pub total_score: i64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_activity: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub players: Vec<RankedPlayer>,
    pub summary: Summary,
}
