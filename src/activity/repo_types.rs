use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Login,
    QuizView,
    QuizCompletion,
    Weather,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Login => "login",
            ActivityType::QuizView => "quiz_view",
            ActivityType::QuizCompletion => "quiz_completion",
            ActivityType::Weather => "weather",
        }
    }
}

impl std::str::FromStr for ActivityType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(ActivityType::Login),
            "quiz_view" => Ok(ActivityType::QuizView),
            "quiz_completion" => Ok(ActivityType::QuizCompletion),
            "weather" => Ok(ActivityType::Weather),
            other => anyhow::bail!("unknown activity type {other:?}"),
        }
    }
}

/// Raw `activities` row; the type column is plain text.
#[derive(Debug, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub description: String,
    pub city: Option<String>,
    pub created_at: OffsetDateTime,
}

/// One immutable audit-log entry.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: ActivityType,
    pub description: String,
    pub city: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = anyhow::Error;

    fn try_from(r: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            activity_type: r.activity_type.parse()?,
            description: r.description,
            city: r.city,
            created_at: r.created_at,
        })
    }
}
