use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::{Activity, ActivityRow, ActivityType};

/// Append-only store of user actions.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(
        &self,
        user_id: Uuid,
        activity_type: ActivityType,
        description: &str,
        city: Option<&str>,
    ) -> anyhow::Result<Activity>;
    /// Newest first, at most `limit` entries.
    async fn recent(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Activity>>;
    async fn last(&self, user_id: Uuid) -> anyhow::Result<Option<Activity>>;
}

pub struct PgActivityRepository {
    db: PgPool,
}

impl PgActivityRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn record(
        &self,
        user_id: Uuid,
        activity_type: ActivityType,
        description: &str,
        city: Option<&str>,
    ) -> anyhow::Result<Activity> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO activities (id, user_id, activity_type, description, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, activity_type, description, city, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(activity_type.as_str())
        .bind(description)
        .bind(city) // Option<&str> → NULL allowed
        .fetch_one(&self.db)
        .await
        .context("insert activity")?;
        row.try_into()
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, user_id, activity_type, description, city, created_at
              FROM activities
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(&self.db)
        .await
        .context("list recent activities")?;
        rows.into_iter().map(Activity::try_from).collect()
    }

    async fn last(&self, user_id: Uuid) -> anyhow::Result<Option<Activity>> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, user_id, activity_type, description, city, created_at
              FROM activities
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get last activity")?;
        row.map(Activity::try_from).transpose()
    }
}

/// Process-local log. Does not check that `user_id` exists; callers only
/// record for authenticated sessions.
#[derive(Default)]
pub struct InMemoryActivityRepository {
    entries: RwLock<Vec<Activity>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn record(
        &self,
        user_id: Uuid,
        activity_type: ActivityType,
        description: &str,
        city: Option<&str>,
    ) -> anyhow::Result<Activity> {
        let activity = Activity {
            id: Uuid::new_v4(),
            user_id,
            activity_type,
            description: description.to_string(),
            city: city.map(str::to_string),
            created_at: OffsetDateTime::now_utc(),
        };
        self.entries.write().await.push(activity.clone());
        Ok(activity)
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Activity>> {
        let entries = self.entries.read().await;
        // appended in time order, so walking backwards is newest first
        Ok(entries
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn last(&self, user_id: Uuid) -> anyhow::Result<Option<Activity>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .find(|a| a.user_id == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recent_is_newest_first_and_capped() {
        let repo = InMemoryActivityRepository::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        for i in 0..5 {
            repo.record(user, ActivityType::Login, &format!("entry {i}"), None)
                .await
                .unwrap();
        }
        repo.record(other, ActivityType::Weather, "elsewhere", Some("Roma"))
            .await
            .unwrap();

        let recent = repo.recent(user, 3).await.unwrap();
        let descriptions: Vec<_> = recent.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(descriptions, ["entry 4", "entry 3", "entry 2"]);

        assert!(repo.recent(user, 0).await.unwrap().is_empty());
        assert_eq!(repo.last(other).await.unwrap().unwrap().city.as_deref(), Some("Roma"));
        assert!(repo.last(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[test]
    fn activity_type_text_round_trip() {
        for t in [
            ActivityType::Login,
            ActivityType::QuizView,
            ActivityType::QuizCompletion,
            ActivityType::Weather,
        ] {
            assert_eq!(t.as_str().parse::<ActivityType>().unwrap(), t);
        }
        assert!("quiz".parse::<ActivityType>().is_err());
    }
}
