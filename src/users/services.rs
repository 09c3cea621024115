use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::repo::UserRepository;
use super::repo_types::User;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::text::title_case;

pub const MIN_PASSWORD_LEN: usize = 6;
const MAX_NICKNAME_SUGGESTIONS: usize = 5;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(
    users: &dyn UserRepository,
    nickname: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> AppResult<User> {
    let nickname = nickname.trim();
    let email = normalize_email(email);

    if nickname.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty()
    {
        return Err(AppError::Validation("all fields are required".into()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("invalid email".into()));
    }
    if password != confirm_password {
        return Err(AppError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }
    if users.find_by_nickname(nickname).await?.is_some() {
        return Err(AppError::DuplicateNickname);
    }

    let hash = hash_password(password).map_err(AppError::Internal)?;
    let user = users.create(nickname, &email, &hash).await?;
    debug!(user_id = %user.id, "user stored");
    Ok(user)
}

pub async fn authenticate(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> AppResult<User> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("all fields are required".into()));
    }
    let Some(user) = users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    // a malformed stored hash is treated like a wrong password
    let ok = verify_password(password, &user.password_hash).unwrap_or(false);
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}

pub async fn find_user(users: &dyn UserRepository, id: Uuid) -> AppResult<User> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))
}

/// Adds `delta` points. Negative deltas and totals past `i64::MAX` are refused.
pub async fn increment_score(users: &dyn UserRepository, user_id: Uuid, delta: i64) -> AppResult<User> {
    if delta < 0 {
        return Err(AppError::InvalidScore(delta));
    }
    users
        .add_score(user_id, delta)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))
}

fn nickname_candidates(query: &str) -> Vec<String> {
    let titled = title_case(query);
    vec![
        format!("{query}96"),
        format!("{query}00"),
        format!("{query}24"),
        format!("Una{titled}"),
        format!("Re{titled}"),
        format!("Duca{titled}"),
        format!("{titled}man"),
        format!("{titled}team"),
        format!("{titled}club"),
        format!("{query}_1"),
    ]
}

/// Free nickname ideas built around `query`. Never fails: storage errors yield nothing.
pub async fn suggest_nicknames(users: &dyn UserRepository, query: &str) -> Vec<String> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Vec::new();
    }

    let taken = match users.nicknames_containing(query).await {
        Ok(names) => names
            .into_iter()
            .map(|n| n.to_lowercase())
            .collect::<Vec<_>>(),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "nickname lookup failed");
            return Vec::new();
        }
    };

    nickname_candidates(query)
        .into_iter()
        .filter(|c| !taken.contains(&c.to_lowercase()))
        .take(MAX_NICKNAME_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::InMemoryUserRepository;

    async fn ada(repo: &InMemoryUserRepository) -> User {
        register(repo, "ada", "Ada@Example.com", "lovelace", "lovelace")
            .await
            .expect("register ada")
    }

    #[tokio::test]
    async fn register_hashes_and_normalizes() {
        let repo = InMemoryUserRepository::new();
        let user = ada(&repo).await;
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.total_score, 0);
        assert_ne!(user.password_hash, "lovelace");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn authenticate_accepts_only_the_registered_password() {
        let repo = InMemoryUserRepository::new();
        let user = ada(&repo).await;

        let found = authenticate(&repo, " ADA@example.com ", "lovelace").await.unwrap();
        assert_eq!(found.id, user.id);

        for wrong in ["Lovelace", "lovelace ", "babbage"] {
            let err = authenticate(&repo, "ada@example.com", wrong).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials), "accepted {wrong:?}");
        }
        let err = authenticate(&repo, "nobody@example.com", "lovelace").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn authenticate_requires_both_fields() {
        let repo = InMemoryUserRepository::new();
        ada(&repo).await;

        for (email, password) in [("ada@example.com", ""), ("  ", "lovelace"), ("", "")] {
            let err = authenticate(&repo, email, password).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{email:?}/{password:?}");
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicates_regardless_of_case() {
        let repo = InMemoryUserRepository::new();
        ada(&repo).await;

        let err = register(&repo, "someone", "ADA@EXAMPLE.COM", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        let err = register(&repo, "ADA", "other@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateNickname));
    }

    #[tokio::test]
    async fn register_validates_input() {
        let repo = InMemoryUserRepository::new();

        let err = register(&repo, "bob", "bob@example.com", "short", "short").await.unwrap_err();
        assert!(matches!(err, AppError::WeakPassword { min: 6 }));

        let err = register(&repo, "bob", "bob@example.com", "secret1", "secret2").await.unwrap_err();
        assert!(matches!(err, AppError::PasswordMismatch));

        let err = register(&repo, "bob", "not-an-email", "secret1", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = register(&repo, "  ", "bob@example.com", "secret1", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn increment_score_rejects_negative_and_accumulates() {
        let repo = InMemoryUserRepository::new();
        let user = ada(&repo).await;

        let err = increment_score(&repo, user.id, -1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidScore(-1)));

        increment_score(&repo, user.id, 80).await.unwrap();
        let updated = increment_score(&repo, user.id, 0).await.unwrap();
        assert_eq!(updated.total_score, 80);
        let updated = increment_score(&repo, user.id, 50).await.unwrap();
        assert_eq!(updated.total_score, 130);
    }

    #[tokio::test]
    async fn increment_score_rejects_overflow_and_keeps_total() {
        let repo = InMemoryUserRepository::new();
        let user = ada(&repo).await;

        let maxed = increment_score(&repo, user.id, i64::MAX).await.unwrap();
        assert_eq!(maxed.total_score, i64::MAX);

        let err = increment_score(&repo, user.id, 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidScore(1)));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);

        let stored = find_user(&repo, user.id).await.unwrap();
        assert_eq!(stored.total_score, i64::MAX);
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }

    #[tokio::test]
    async fn nickname_suggestions_skip_taken_names() {
        let repo = InMemoryUserRepository::new();
        register(&repo, "marco96", "m@example.com", "secret1", "secret1")
            .await
            .unwrap();

        let got = suggest_nicknames(&repo, "marco").await;
        assert_eq!(got, vec!["marco00", "marco24", "UnaMarco", "ReMarco", "DucaMarco"]);

        assert!(suggest_nicknames(&repo, "m").await.is_empty());
        assert!(suggest_nicknames(&repo, "  ").await.is_empty());
    }
}
