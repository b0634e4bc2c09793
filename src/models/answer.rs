use crate::error::{Error, Result};
use crate::models::question::QuestionType;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Submitted payload, one shape per question type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    #[default]
    Omitted,
    SingleChoice(String),
    MultiChoice(Vec<String>),
    TrueFalseTable(Vec<bool>),
    ShortAnswer(String),
}

impl AnswerValue {
    /// A skipped answer, whatever shape it arrived in.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Omitted => true,
            AnswerValue::SingleChoice(s) | AnswerValue::ShortAnswer(s) => s.trim().is_empty(),
            AnswerValue::MultiChoice(indices) => indices.iter().all(|i| i.trim().is_empty()),
            AnswerValue::TrueFalseTable(row) => row.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnswerValue::Omitted => "omitted",
            AnswerValue::SingleChoice(_) => "single_choice",
            AnswerValue::MultiChoice(_) => "multi_choice",
            AnswerValue::TrueFalseTable(_) => "true_false_table",
            AnswerValue::ShortAnswer(_) => "short_answer",
        }
    }

    /// Converts a loosely-typed stored payload into a typed answer.
    ///
    /// The question type only disambiguates scalars and empty arrays; any other
    /// mismatch is left for the evaluator to reject.
    pub fn from_json(
        question_id: Uuid,
        question_type: QuestionType,
        raw: &JsonValue,
    ) -> Result<Self> {
        let raw = match raw {
            JsonValue::Object(map) => match map.get("selected").or_else(|| map.get("answer")) {
                Some(inner) if !inner.is_object() => inner,
                _ => {
                    return Err(Error::malformed(
                        question_id,
                        "object payload without a `selected` or `answer` field",
                    ))
                }
            },
            other => other,
        };

        match raw {
            JsonValue::Null => Ok(AnswerValue::Omitted),
            JsonValue::String(s) => Ok(scalar(question_type, s.clone())),
            JsonValue::Number(n) => Ok(scalar(question_type, n.to_string())),
            JsonValue::Array(items) if items.is_empty() => Ok(match question_type {
                QuestionType::TrueFalseTable => AnswerValue::TrueFalseTable(Vec::new()),
                _ => AnswerValue::MultiChoice(Vec::new()),
            }),
            JsonValue::Array(items) => {
                if let Some(row) = items.iter().map(|v| v.as_bool()).collect::<Option<Vec<_>>>() {
                    return Ok(AnswerValue::TrueFalseTable(row));
                }
                items
                    .iter()
                    .map(|v| match v {
                        JsonValue::String(s) => Some(s.clone()),
                        JsonValue::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(AnswerValue::MultiChoice)
                    .ok_or_else(|| {
                        Error::malformed(question_id, "array mixes option indices and booleans")
                    })
            }
            JsonValue::Bool(_) => Err(Error::malformed(
                question_id,
                "a bare boolean is not a valid answer",
            )),
            JsonValue::Object(_) => Err(Error::malformed(question_id, "nested object payload")),
        }
    }
}

fn scalar(question_type: QuestionType, s: String) -> AnswerValue {
    match question_type {
        QuestionType::ShortAnswer => AnswerValue::ShortAnswer(s),
        _ => AnswerValue::SingleChoice(s),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub question_id: Uuid,
    #[serde(default)]
    pub value: AnswerValue,
}

/// Answer as kept by the record store, before it is typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnswer {
    pub question_id: Uuid,
    #[serde(default)]
    pub answer: JsonValue,
}

impl StoredAnswer {
    pub fn to_submission(&self, question_type: QuestionType) -> Result<Submission> {
        let value = AnswerValue::from_json(self.question_id, question_type, &self.answer)?;
        Ok(Submission::new(self.question_id, value))
    }
}

impl Submission {
    pub fn new(question_id: Uuid, value: AnswerValue) -> Self {
        Self { question_id, value }
    }

    pub fn omitted(question_id: Uuid) -> Self {
        Self::new(question_id, AnswerValue::Omitted)
    }
}
