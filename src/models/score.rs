use crate::models::answer::AnswerValue;
use crate::models::question::QuestionType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub question_id: Uuid,
    pub is_correct: bool,
    pub difficulty: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttemptScore {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub raw_score: f64,
    /// Only meaningful relative to the population it was scaled against.
    pub scaled_score: Option<f64>,
}

impl AttemptScore {
    pub fn evaluated(&self) -> u32 {
        self.correct_count + self.wrong_count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_id: Uuid,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: f64,
    pub submitted: AnswerValue,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAttempt {
    pub attempt_id: Uuid,
    pub student_id: String,
    pub graded: Vec<GradedAnswer>,
    pub score: AttemptScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub question_id: Uuid,
    pub difficulty: f64,
    pub attempted: u32,
    pub correct: u32,
    pub proportion_correct: f64,
}
