use rand::{seq::index, Rng};
use serde::{Deserialize, Serialize};

use super::catalog;

pub const POINTS_PER_CORRECT: i64 = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A multiple-choice question. `correct_index` is always < 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: usize,
    pub prompt: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_index: u8,
}

impl Question {
    pub fn new(
        id: usize,
        prompt: impl Into<String>,
        options: [String; OPTIONS_PER_QUESTION],
        correct_index: u8,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (correct_index as usize) < OPTIONS_PER_QUESTION,
            "correct index {correct_index} out of range"
        );
        Ok(Self {
            id,
            prompt: prompt.into(),
            options,
            correct_index,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: usize,
    pub chosen_index: usize,
}

/// Holds the catalog and draws per-attempt question sets from it.
pub struct QuizEngine {
    questions: Vec<Question>,
    session_size: usize,
}

impl QuizEngine {
    pub fn new(questions: Vec<Question>, session_size: usize) -> Self {
        Self {
            questions,
            session_size,
        }
    }

    pub fn with_builtin_catalog(session_size: usize) -> anyhow::Result<Self> {
        Ok(Self::new(catalog::builtin()?, session_size))
    }

    pub fn catalog_size(&self) -> usize {
        self.questions.len()
    }

    /// Default number of questions per session.
    pub fn session_size(&self) -> usize {
        self.session_size
    }

    pub fn draw_session(&self, count: usize) -> Vec<Question> {
        self.draw_session_with(count, &mut rand::thread_rng())
    }

    /// Uniform sample without replacement of `min(count, catalog size)`
    /// questions, options in stored order.
    pub fn draw_session_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Question> {
        let amount = count.min(self.questions.len());
        index::sample(rng, self.questions.len(), amount)
            .into_iter()
            .map(|i| self.questions[i].clone())
            .collect()
    }

    /// Server-side grading. Unknown questions and out-of-range choices score nothing.
    pub fn score(&self, answers: &[SubmittedAnswer]) -> i64 {
        answers
            .iter()
            .filter(|a| {
                self.questions
                    .iter()
                    .find(|q| q.id == a.question_id)
                    .is_some_and(|q| q.correct_index as usize == a.chosen_index)
            })
            .count() as i64
            * POINTS_PER_CORRECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn small_catalog(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    i,
                    format!("question {i}"),
                    ["a".into(), "b".into(), "c".into(), "d".into()],
                    (i % 4) as u8,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn draws_distinct_questions_up_to_count() {
        let engine = QuizEngine::new(small_catalog(40), 30);
        let session = engine.draw_session(30);
        assert_eq!(session.len(), 30);
        let ids: HashSet<_> = session.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn small_catalog_is_returned_whole() {
        let engine = QuizEngine::new(small_catalog(10), 30);
        let session = engine.draw_session(30);
        assert_eq!(session.len(), 10);
        let ids: HashSet<_> = session.iter().map(|q| q.id).collect();
        assert_eq!(ids, (0..10).collect::<HashSet<_>>());
    }

    #[test]
    fn draws_are_independent() {
        let engine = QuizEngine::with_builtin_catalog(30).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let first: Vec<_> = engine.draw_session_with(5, &mut rng).iter().map(|q| q.id).collect();
        let differs = (0..20).any(|_| {
            let next: Vec<_> = engine.draw_session_with(5, &mut rng).iter().map(|q| q.id).collect();
            next != first
        });
        assert!(differs);
    }

    #[test]
    fn options_keep_stored_order() {
        let engine = QuizEngine::new(small_catalog(3), 3);
        for q in engine.draw_session(3) {
            assert_eq!(q.options, ["a", "b", "c", "d"].map(String::from));
        }
    }

    #[test]
    fn empty_catalog_draws_nothing() {
        let engine = QuizEngine::new(Vec::new(), 30);
        assert!(engine.draw_session(30).is_empty());
    }

    #[test]
    fn builtin_catalog_loads_through_validation() {
        let engine = QuizEngine::with_builtin_catalog(30).unwrap();
        assert_eq!(engine.catalog_size(), 41);
        assert_eq!(engine.session_size(), 30);
    }

    #[test]
    fn question_rejects_bad_correct_index() {
        let options = ["a".into(), "b".into(), "c".into(), "d".into()];
        assert!(Question::new(0, "q", options, 4).is_err());
    }

    #[test]
    fn score_counts_correct_answers_only() {
        let engine = QuizEngine::new(small_catalog(8), 8);
        let answers = [
            SubmittedAnswer { question_id: 0, chosen_index: 0 },  // correct
            SubmittedAnswer { question_id: 1, chosen_index: 1 },  // correct
            SubmittedAnswer { question_id: 2, chosen_index: 0 },  // wrong
            SubmittedAnswer { question_id: 3, chosen_index: 9 },  // out of range
            SubmittedAnswer { question_id: 99, chosen_index: 0 }, // unknown
        ];
        assert_eq!(engine.score(&answers), 2 * POINTS_PER_CORRECT);
        assert_eq!(engine.score(&[]), 0);
    }
}
