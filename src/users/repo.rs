use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::User;
use crate::error::AppError;

const EMAIL_CONSTRAINT: &str = "users_email_key";
/// SQLSTATE raised when `total_score` would leave the BIGINT range.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Storage seam for user records. Emails arrive already normalized.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<User>>;
    /// Fails with `AppError::DuplicateEmail` / `DuplicateNickname` on a unique violation.
    async fn create(&self, nickname: &str, email: &str, password_hash: &str)
        -> anyhow::Result<User>;
    /// Returns `None` when the user does not exist.
    async fn add_score(&self, id: Uuid, delta: i64) -> anyhow::Result<Option<User>>;
    /// All users in registration order.
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    async fn nicknames_containing(&self, fragment: &str) -> anyhow::Result<Vec<String>>;
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nickname, email, password_hash, total_score, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nickname, email, password_hash, total_score, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nickname, email, password_hash, total_score, created_at
            FROM users
            WHERE lower(nickname) = lower($1)
            "#,
        )
        .bind(nickname)
        .fetch_optional(&self.db)
        .await
        .context("find user by nickname")?;
        Ok(user)
    }

    async fn create(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, nickname, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nickname, email, password_hash, total_score, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nickname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) => {
                let email_conflict = match &e {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        Some(db.constraint() == Some(EMAIL_CONSTRAINT))
                    }
                    _ => None,
                };
                match email_conflict {
                    Some(true) => Err(AppError::DuplicateEmail.into()),
                    Some(false) => Err(AppError::DuplicateNickname.into()),
                    None => Err(anyhow::Error::new(e).context("insert user")),
                }
            }
        }
    }

    async fn add_score(&self, id: Uuid, delta: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET total_score = total_score + $2
             WHERE id = $1
            RETURNING id, nickname, email, password_hash, total_score, created_at
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&self.db)
        .await;

        match user {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
                Err(AppError::InvalidScore(delta).into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("update user score")),
        }
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nickname, email, password_hash, total_score, created_at
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(users)
    }

    async fn nicknames_containing(&self, fragment: &str) -> anyhow::Result<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT nickname
              FROM users
             WHERE nickname ILIKE '%' || $1 || '%'
            "#,
        )
        .bind(escape_like(fragment))
        .fetch_all(&self.db)
        .await
        .context("search nicknames")?;
        Ok(rows)
    }
}

/// Process-local store, used by `STORAGE_BACKEND=memory` and tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<User>> {
        let wanted = nickname.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.nickname.to_lowercase() == wanted)
            .cloned())
    }

    async fn create(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail.into());
        }
        let lowered = nickname.to_lowercase();
        if users.iter().any(|u| u.nickname.to_lowercase() == lowered) {
            return Err(AppError::DuplicateNickname.into());
        }
        let user = User {
            id: Uuid::new_v4(),
            nickname: nickname.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            total_score: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn add_score(&self, id: Uuid, delta: i64) -> anyhow::Result<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.total_score = user
            .total_score
            .checked_add(delta)
            .ok_or(AppError::InvalidScore(delta))?;
        Ok(Some(user.clone()))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn nicknames_containing(&self, fragment: &str) -> anyhow::Result<Vec<String>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.nickname.to_lowercase().contains(&needle))
            .map(|u| u.nickname.clone())
            .collect())
    }
}
