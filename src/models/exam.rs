use crate::models::answer::{StoredAnswer, Submission};
use crate::models::policy::RawScoreRule;
use crate::models::question::Question;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Exam {
    pub id: Uuid,
    pub period_id: Uuid,
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1, message = "Exam must contain at least one question"), nested)]
    pub questions: Vec<Question>,
}

impl Exam {
    /// Best raw score reachable under `rule`.
    pub fn max_possible(&self, rule: RawScoreRule) -> f64 {
        match rule {
            RawScoreRule::Count => self.questions.len() as f64,
            RawScoreRule::DifficultyWeighted => self.questions.iter().map(|q| q.difficulty).sum(),
        }
    }

    pub fn question(&self, id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Attempt {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub student_id: String,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    /// Untyped answers straight from the record store; typed submissions take precedence.
    #[serde(default)]
    pub answers: Vec<StoredAnswer>,
}
