use crate::error::{Error, Result};
use crate::models::answer::{AnswerValue, Submission};
use crate::models::question::{Question, QuestionType};
use crate::models::score::EvaluationOutcome;
use crate::utils::text::normalize_answer;
use std::collections::HashSet;

pub struct EvaluationService;

impl EvaluationService {
    /// Decides whole-item correctness of one submission. Skipped answers are wrong, never errors.
    pub fn evaluate(question: &Question, submission: &Submission) -> Result<EvaluationOutcome> {
        if submission.question_id != question.id {
            return Err(Error::malformed(
                question.id,
                format!("submission targets question {}", submission.question_id),
            ));
        }

        let is_correct = if submission.value.is_empty() {
            false
        } else {
            match question.question_type {
                QuestionType::SingleChoice => single_choice(question, &submission.value)?,
                QuestionType::MultiChoice => multi_choice(question, &submission.value)?,
                QuestionType::TrueFalseTable => true_false_table(question, &submission.value)?,
                QuestionType::ShortAnswer => short_answer(question, &submission.value)?,
            }
        };

        Ok(EvaluationOutcome {
            question_id: question.id,
            is_correct,
            difficulty: question.difficulty,
        })
    }
}

fn single_choice(question: &Question, value: &AnswerValue) -> Result<bool> {
    let AnswerValue::SingleChoice(index) = value else {
        return Err(shape_mismatch(question, value));
    };
    question
        .option(index.trim())
        .map(|o| o.is_correct)
        .ok_or_else(|| unknown_index(question, index))
}

fn multi_choice(question: &Question, value: &AnswerValue) -> Result<bool> {
    // A lone index is a one-element selection.
    let submitted: HashSet<&str> = match value {
        AnswerValue::MultiChoice(indices) => indices
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect(),
        AnswerValue::SingleChoice(index) => HashSet::from([index.trim()]),
        other => return Err(shape_mismatch(question, other)),
    };

    if let Some(unknown) = submitted.iter().find(|i| question.option(i).is_none()) {
        return Err(unknown_index(question, unknown));
    }

    Ok(submitted == question.correct_indices())
}

fn true_false_table(question: &Question, value: &AnswerValue) -> Result<bool> {
    let AnswerValue::TrueFalseTable(row) = value else {
        return Err(shape_mismatch(question, value));
    };

    let expected: Vec<bool> = question.table_rows().map(|o| o.is_correct).collect();
    if row.len() != expected.len() {
        return Err(Error::malformed(
            question.id,
            format!(
                "expected {} true/false entries, got {}",
                expected.len(),
                row.len()
            ),
        ));
    }

    Ok(row == &expected)
}

fn short_answer(question: &Question, value: &AnswerValue) -> Result<bool> {
    let AnswerValue::ShortAnswer(text) = value else {
        return Err(shape_mismatch(question, value));
    };
    let canonical = question.correct_text.as_deref().ok_or_else(|| {
        Error::InvalidQuestion(format!("short answer question {} has no correct_text", question.id))
    })?;

    Ok(normalize_answer(text) == normalize_answer(canonical))
}

fn shape_mismatch(question: &Question, value: &AnswerValue) -> Error {
    Error::malformed(
        question.id,
        format!(
            "{} payload does not fit a {} question",
            value.kind(),
            question.question_type.as_str()
        ),
    )
}

fn unknown_index(question: &Question, index: &str) -> Error {
    Error::malformed(question.id, format!("unknown option index {:?}", index))
}
