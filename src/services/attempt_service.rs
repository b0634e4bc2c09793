use crate::error::Result;
use crate::models::answer::{StoredAnswer, Submission};
use crate::models::exam::{Attempt, Exam};
use crate::models::question::Question;
use crate::models::score::{EvaluationOutcome, GradedAnswer, GradedAttempt};
use crate::services::evaluation_service::EvaluationService;
use crate::services::scoring_service::ScoringService;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptService {
    scoring: ScoringService,
}

impl AttemptService {
    pub fn new(scoring: ScoringService) -> Self {
        Self { scoring }
    }

    /// Grades every exam question against the attempt. The scaled score is left unset.
    ///
    /// Missing answers count as wrong. A malformed answer is logged and counted as wrong
    /// without stopping the rest of the attempt.
    pub fn grade(&self, exam: &Exam, attempt: &Attempt) -> Result<GradedAttempt> {
        let typed = index_by_question(exam, attempt.id, &attempt.submissions, |s: &Submission| {
            s.question_id
        });
        let stored = index_by_question(exam, attempt.id, &attempt.answers, |a: &StoredAnswer| {
            a.question_id
        });

        let mut outcomes: Vec<EvaluationOutcome> = Vec::with_capacity(exam.questions.len());
        let mut graded: Vec<GradedAnswer> = Vec::with_capacity(exam.questions.len());

        for q in &exam.questions {
            let resolved = match (typed.get(&q.id), stored.get(&q.id)) {
                (Some(sub), _) => Ok((*sub).clone()),
                (None, Some(raw)) => raw.to_submission(q.question_type),
                (None, None) => Ok(Submission::omitted(q.id)),
            };

            let (submission, evaluated) = match resolved {
                Ok(sub) => {
                    let evaluated = EvaluationService::evaluate(q, &sub);
                    (sub, evaluated)
                }
                Err(e) => (Submission::omitted(q.id), Err(e)),
            };

            let (outcome, malformed) = match evaluated {
                Ok(outcome) => (outcome, None),
                Err(e) if e.is_per_question() => {
                    tracing::warn!(
                        attempt_id = %attempt.id,
                        question_id = %q.id,
                        error = %e,
                        "Malformed answer recorded as wrong"
                    );
                    (wrong(q), Some(e.to_string()))
                }
                Err(e) => return Err(e),
            };

            graded.push(GradedAnswer {
                question_id: q.id,
                question_type: q.question_type,
                difficulty: q.difficulty,
                submitted: submission.value,
                is_correct: outcome.is_correct,
                malformed,
            });
            outcomes.push(outcome);
        }

        let score = self.scoring.score(&outcomes);
        tracing::debug!(
            attempt_id = %attempt.id,
            correct = score.correct_count,
            wrong = score.wrong_count,
            raw = score.raw_score,
            "Attempt graded"
        );

        Ok(GradedAttempt {
            attempt_id: attempt.id,
            student_id: attempt.student_id.clone(),
            graded,
            score,
        })
    }
}

fn wrong(q: &Question) -> EvaluationOutcome {
    EvaluationOutcome {
        question_id: q.id,
        is_correct: false,
        difficulty: q.difficulty,
    }
}

/// Later entries for the same question replace earlier ones.
fn index_by_question<'a, T>(
    exam: &Exam,
    attempt_id: Uuid,
    items: &'a [T],
    key: impl Fn(&T) -> Uuid,
) -> HashMap<Uuid, &'a T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let question_id = key(item);
        if exam.question(question_id).is_none() {
            tracing::warn!(
                attempt_id = %attempt_id,
                question_id = %question_id,
                "Ignoring answer for a question outside the exam"
            );
            continue;
        }
        map.insert(question_id, item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::AnswerValue;
    use crate::models::question::{QuestionOption, QuestionType};
    use serde_json::json;

    fn exam() -> Exam {
        let option = |index: &str, is_correct: bool| QuestionOption {
            index: index.into(),
            text: None,
            is_correct,
        };
        Exam {
            id: Uuid::new_v4(),
            period_id: Uuid::new_v4(),
            title: "Sejarah".into(),
            questions: vec![
                Question {
                    id: Uuid::new_v4(),
                    question_type: QuestionType::SingleChoice,
                    question: "Proklamator?".into(),
                    difficulty: 1.0,
                    options: vec![option("A", false), option("B", true)],
                    correct_text: None,
                },
                Question {
                    id: Uuid::new_v4(),
                    question_type: QuestionType::ShortAnswer,
                    question: "Presiden pertama?".into(),
                    difficulty: 2.0,
                    options: vec![],
                    correct_text: Some("Soekarno".into()),
                },
                Question {
                    id: Uuid::new_v4(),
                    question_type: QuestionType::TrueFalseTable,
                    question: "Benar/salah".into(),
                    difficulty: 3.0,
                    options: vec![option("1", true), option("2", false)],
                    correct_text: None,
                },
            ],
        }
    }

    fn attempt(submissions: Vec<Submission>, answers: Vec<StoredAnswer>) -> Attempt {
        Attempt {
            id: Uuid::new_v4(),
            student_id: "student-1".into(),
            submissions,
            answers,
        }
    }

    #[test]
    fn skipped_questions_count_as_wrong() {
        let exam = exam();
        let graded = AttemptService::default()
            .grade(&exam, &attempt(vec![], vec![]))
            .unwrap();
        assert_eq!(graded.score.correct_count, 0);
        assert_eq!(graded.score.wrong_count, 3);
        assert!(graded.graded.iter().all(|g| g.submitted == AnswerValue::Omitted));
    }

    #[test]
    fn malformed_answer_does_not_abort_attempt() {
        let exam = exam();
        let q = &exam.questions;
        let graded = AttemptService::default()
            .grade(
                &exam,
                &attempt(
                    vec![
                        Submission::new(q[0].id, AnswerValue::SingleChoice("E".into())),
                        Submission::new(q[1].id, AnswerValue::ShortAnswer(" SOEKARNO".into())),
                        Submission::new(q[2].id, AnswerValue::TrueFalseTable(vec![true, false])),
                    ],
                    vec![],
                ),
            )
            .unwrap();

        assert_eq!(graded.score.correct_count, 2);
        assert_eq!(graded.score.wrong_count, 1);
        assert!(graded.graded[0].malformed.is_some());
        assert!(graded.graded[1].malformed.is_none());
    }

    #[test]
    fn stored_answers_are_typed_per_question() {
        let exam = exam();
        let q = &exam.questions;
        let graded = AttemptService::default()
            .grade(
                &exam,
                &attempt(
                    vec![],
                    vec![
                        StoredAnswer {
                            question_id: q[0].id,
                            answer: json!({"selected": "B"}),
                        },
                        StoredAnswer {
                            question_id: q[1].id,
                            answer: json!(true),
                        },
                        StoredAnswer {
                            question_id: q[2].id,
                            answer: json!([true, false]),
                        },
                    ],
                ),
            )
            .unwrap();

        assert_eq!(graded.score.correct_count, 2);
        assert!(graded.graded[1].malformed.is_some());
        assert_eq!(graded.graded[1].submitted, AnswerValue::Omitted);
    }

    #[test]
    fn typed_submission_wins_over_stored_answer() {
        let exam = exam();
        let q = &exam.questions;
        let graded = AttemptService::default()
            .grade(
                &exam,
                &attempt(
                    vec![Submission::new(q[0].id, AnswerValue::SingleChoice("B".into()))],
                    vec![StoredAnswer {
                        question_id: q[0].id,
                        answer: json!("A"),
                    }],
                ),
            )
            .unwrap();
        assert!(graded.graded[0].is_correct);
    }

    #[test]
    fn answers_outside_exam_are_ignored() {
        let exam = exam();
        let graded = AttemptService::default()
            .grade(
                &exam,
                &attempt(
                    vec![Submission::new(
                        Uuid::new_v4(),
                        AnswerValue::SingleChoice("B".into()),
                    )],
                    vec![],
                ),
            )
            .unwrap();
        assert_eq!(graded.score.evaluated(), 3);
        assert_eq!(graded.score.correct_count, 0);
    }

    #[test]
    fn weighted_policy_flows_into_raw_score() {
        use crate::models::policy::{RawScoreRule, ScoringPolicy};

        let exam = exam();
        let q = &exam.questions;
        let service = AttemptService::new(ScoringService::new(ScoringPolicy {
            raw_score_rule: RawScoreRule::DifficultyWeighted,
            ..Default::default()
        }));
        let graded = service
            .grade(
                &exam,
                &attempt(
                    vec![
                        Submission::new(q[1].id, AnswerValue::ShortAnswer("soekarno".into())),
                        Submission::new(q[2].id, AnswerValue::TrueFalseTable(vec![true, false])),
                    ],
                    vec![],
                ),
            )
            .unwrap();
        assert_eq!(graded.score.raw_score, 5.0);
    }
}
