use serde::Serialize;
use time::OffsetDateTime;

use crate::activity::{repo::ActivityRepository, services::last};
use crate::error::AppResult;
use crate::users::{repo::UserRepository, repo_types::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub max_score: i64,
    pub average_score: i64,
}

/// Highest score first; equal scores keep registration order.
pub fn rank(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then(a.created_at.cmp(&b.created_at))
    });
    users
}

/// Average is rounded half-to-even; no players means all zeros.
pub fn summarize(scores: &[i64]) -> Summary {
    if scores.is_empty() {
        return Summary {
            count: 0,
            max_score: 0,
            average_score: 0,
        };
    }
    let sum: i128 = scores.iter().map(|&s| s as i128).sum();
    let average = (sum as f64 / scores.len() as f64).round_ties_even();
    Summary {
        count: scores.len(),
        max_score: scores.iter().copied().max().unwrap_or(0),
        average_score: average as i64,
    }
}

/// Summary of an already ranked snapshot, so both halves of the
/// leaderboard describe the same players.
pub fn summarize_ranked(rows: &[(User, Option<OffsetDateTime>)]) -> Summary {
    let scores: Vec<i64> = rows.iter().map(|(user, _)| user.total_score).collect();
    summarize(&scores)
}

pub async fn rankings(
    users: &dyn UserRepository,
    activities: &dyn ActivityRepository,
) -> AppResult<Vec<(User, Option<OffsetDateTime>)>> {
    let ranked = rank(users.list_all().await?);
    let mut out = Vec::with_capacity(ranked.len());
    for user in ranked {
        let seen = last(activities, user.id).await?.map(|a| a.created_at);
        out.push((user, seen));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::repo::InMemoryActivityRepository;
    use crate::activity::repo_types::ActivityType;
    use crate::users::repo::InMemoryUserRepository;
    use time::Duration;
    use uuid::Uuid;

    fn user(nickname: &str, score: i64, minutes: i64) -> User {
        User {
            id: Uuid::new_v4(),
            nickname: nickname.into(),
            email: format!("{nickname}@example.com"),
            password_hash: String::new(),
            total_score: score,
            created_at: OffsetDateTime::UNIX_EPOCH + Duration::minutes(minutes),
        }
    }

    fn nicknames(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.nickname.as_str()).collect()
    }

    #[test]
    fn rank_sorts_descending() {
        let ranked = rank(vec![user("a", 10, 0), user("b", 30, 1), user("c", 20, 2)]);
        assert_eq!(nicknames(&ranked), ["b", "c", "a"]);
        assert!(ranked.windows(2).all(|w| w[0].total_score >= w[1].total_score));
    }

    #[test]
    fn rank_breaks_ties_by_registration() {
        let ranked = rank(vec![user("late", 5, 9), user("early", 5, 1), user("mid", 5, 4)]);
        assert_eq!(nicknames(&ranked), ["early", "mid", "late"]);
    }

    #[test]
    fn rank_is_stable_for_identical_keys() {
        let ranked = rank(vec![user("x", 0, 0), user("y", 0, 0), user("z", 0, 0)]);
        assert_eq!(nicknames(&ranked), ["x", "y", "z"]);
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn summary_covers_exactly_the_ranked_rows() {
        let rows: Vec<_> = rank(vec![user("a", 10, 0), user("b", 31, 1)])
            .into_iter()
            .map(|u| (u, None))
            .collect();
        let s = summarize_ranked(&rows);
        // 41 / 2 = 20.5 -> 20
        assert_eq!((s.count, s.max_score, s.average_score), (2, 31, 20));
    }

    #[test]
    fn summary_of_nobody_is_zero() {
        assert_eq!(
            summarize(&[]),
            Summary {
                count: 0,
                max_score: 0,
                average_score: 0
            }
        );
    }

    #[test]
    fn summary_rounds_half_to_even() {
        assert_eq!(summarize(&[130, 0, 20]).average_score, 50);
        // 5 / 2 = 2.5 -> 2, 7 / 2 = 3.5 -> 4
        assert_eq!(summarize(&[5, 0]).average_score, 2);
        assert_eq!(summarize(&[7, 0]).average_score, 4);
        let s = summarize(&[10, 40, 25]);
        assert_eq!((s.count, s.max_score, s.average_score), (3, 40, 25));
    }

    #[tokio::test]
    async fn rankings_attach_last_activity() {
        let users = InMemoryUserRepository::new();
        let activities = InMemoryActivityRepository::new();
        let a = users.create("ada", "ada@example.com", "h").await.unwrap();
        let b = users.create("bob", "bob@example.com", "h").await.unwrap();
        users.add_score(b.id, 40).await.unwrap();
        users.add_score(a.id, 10).await.unwrap();
        let logged = activities
            .record(a.id, ActivityType::Login, "Logged in", None)
            .await
            .unwrap();

        let rows = rankings(&users, &activities).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.nickname, "bob");
        assert_eq!(rows[0].1, None);
        assert_eq!(rows[1].0.nickname, "ada");
        assert_eq!(rows[1].1, Some(logged.created_at));

        let s = summarize_ranked(&rows);
        assert_eq!((s.count, s.max_score, s.average_score), (2, 40, 25));
    }

    #[tokio::test]
    async fn rankings_of_empty_store() {
        let users = InMemoryUserRepository::new();
        let activities = InMemoryActivityRepository::new();
        let rows = rankings(&users, &activities).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(summarize_ranked(&rows), summarize(&[]));
    }
}
