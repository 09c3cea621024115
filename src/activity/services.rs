use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use super::repo::ActivityRepository;
use super::repo_types::{Activity, ActivityType};
use crate::error::AppResult;

pub const PROFILE_ACTIVITY_LIMIT: i64 = 10;

pub async fn record(
    activities: &dyn ActivityRepository,
    user_id: Uuid,
    activity_type: ActivityType,
    description: &str,
    city: Option<&str>,
) -> AppResult<Activity> {
    Ok(activities
        .record(user_id, activity_type, description, city)
        .await?)
}

pub async fn record_login(activities: &dyn ActivityRepository, user_id: Uuid) -> AppResult<Activity> {
    record(activities, user_id, ActivityType::Login, "Logged in", None).await
}

pub async fn record_quiz_view(
    activities: &dyn ActivityRepository,
    user_id: Uuid,
) -> AppResult<Activity> {
    record(
        activities,
        user_id,
        ActivityType::QuizView,
        "Opened the quiz page",
        None,
    )
    .await
}

pub async fn record_quiz_completion(
    activities: &dyn ActivityRepository,
    user_id: Uuid,
    points: i64,
) -> AppResult<Activity> {
    let description = format!("Completed a quiz scoring {points} points");
    record(
        activities,
        user_id,
        ActivityType::QuizCompletion,
        &description,
        None,
    )
    .await
}

pub async fn record_weather(
    activities: &dyn ActivityRepository,
    user_id: Uuid,
    city: &str,
) -> AppResult<Activity> {
    let description = format!("Checked the weather forecast for {city}");
    record(
        activities,
        user_id,
        ActivityType::Weather,
        &description,
        Some(city),
    )
    .await
}

pub async fn recent(
    activities: &dyn ActivityRepository,
    user_id: Uuid,
    limit: i64,
) -> AppResult<Vec<Activity>> {
    Ok(activities.recent(user_id, limit).await?)
}

pub async fn last(activities: &dyn ActivityRepository, user_id: Uuid) -> AppResult<Option<Activity>> {
    Ok(activities.last(user_id).await?)
}

/// Activity plus its timestamp shifted to the display offset.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(with = "time::serde::rfc3339")]
    pub local_time: OffsetDateTime,
}

pub fn localize(activities: Vec<Activity>, offset: UtcOffset) -> Vec<ActivityView> {
    activities
        .into_iter()
        .map(|activity| ActivityView {
            local_time: activity.created_at.to_offset(offset),
            activity,
        })
        .collect()
}
