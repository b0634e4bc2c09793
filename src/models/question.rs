use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_question_shape"))]
pub struct Question {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub question: String,
    #[serde(default = "default_difficulty")]
    #[validate(range(exclusive_min = 0.0, message = "Difficulty must be positive"))]
    pub difficulty: f64,
    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub correct_text: Option<String>,
}

fn default_difficulty() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    TrueFalseTable,
    ShortAnswer,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultiChoice => "multi_choice",
            QuestionType::TrueFalseTable => "true_false_table",
            QuestionType::ShortAnswer => "short_answer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionOption {
    #[validate(length(min = 1))]
    pub index: String,
    #[serde(default)]
    pub text: Option<String>,
    pub is_correct: bool,
}

impl Question {
    pub fn option(&self, index: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.index == index)
    }

    /// Indices of options marked correct, in stored order.
    pub fn correct_indices(&self) -> HashSet<&str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.index.as_str())
            .collect()
    }

    /// Options that take part in a true/false table row.
    pub fn table_rows(&self) -> impl Iterator<Item = &QuestionOption> {
        self.options.iter().filter(|o| !o.index.trim().is_empty())
    }
}

fn validate_question_shape(q: &Question) -> Result<(), ValidationError> {
    let has_text = q
        .correct_text
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);

    match q.question_type {
        QuestionType::ShortAnswer => {
            if !has_text {
                return Err(shape_error("short_answer requires correct_text"));
            }
            if !q.options.is_empty() {
                return Err(shape_error("short_answer must not carry options"));
            }
        }
        _ => {
            if q.options.is_empty() {
                return Err(shape_error("choice questions require at least one option"));
            }
            if q.correct_text.is_some() {
                return Err(shape_error("choice questions must not carry correct_text"));
            }
            let mut seen = HashSet::new();
            if !q.options.iter().all(|o| seen.insert(o.index.as_str())) {
                return Err(shape_error("option indices must be unique"));
            }
        }
    }

    Ok(())
}

fn shape_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("question_shape");
    err.message = Some(message.into());
    err
}
