use crate::dto::scoring_dto::{ScoreBatchRequest, ScoreBatchResponse};
use crate::error::{Error, Result};
use crate::models::exam::Exam;
use crate::models::policy::ScoringPolicy;
use crate::models::score::{AttemptScore, GradedAttempt, ItemStats};
use crate::services::attempt_service::AttemptService;
use crate::services::scoring_service::ScoringService;
use crate::utils::time;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchService {
    default_policy: ScoringPolicy,
}

impl BatchService {
    pub fn new(default_policy: ScoringPolicy) -> Self {
        Self { default_policy }
    }

    /// Grades and scales a whole population from scratch.
    ///
    /// Nothing is cached between calls: adding or correcting one attempt shifts every
    /// scaled score, so the full batch is always recomputed.
    pub fn score(&self, request: &ScoreBatchRequest) -> Result<ScoreBatchResponse> {
        if request.attempts.is_empty() {
            return Err(Error::InvalidPopulation);
        }
        request.validate()?;

        let policy = request.policy.unwrap_or(self.default_policy);
        let scoring = ScoringService::new(policy);
        let grader = AttemptService::new(scoring);
        let exam = &request.exam;

        let mut results = request
            .attempts
            .iter()
            .map(|attempt| grader.grade(exam, attempt))
            .collect::<Result<Vec<GradedAttempt>>>()?;

        let max_possible = exam.max_possible(policy.raw_score_rule);
        let mut scores: Vec<AttemptScore> = results.iter().map(|r| r.score).collect();
        scoring.scale_population(&mut scores, max_possible)?;
        for (result, score) in results.iter_mut().zip(scores) {
            result.score = score;
        }

        let raw: Vec<f64> = results.iter().map(|r| r.score.raw_score).collect();
        let population = ScoringService::population_stats(&raw)?;

        tracing::info!(
            exam_id = %exam.id,
            period_id = %exam.period_id,
            attempts = population.count,
            mean = population.mean,
            scaling_mode = ?policy.scaling_mode,
            "Scored exam batch"
        );

        Ok(ScoreBatchResponse {
            exam_id: exam.id,
            period_id: exam.period_id,
            scaling_mode: policy.scaling_mode,
            raw_score_rule: policy.raw_score_rule,
            max_possible,
            population,
            items: item_stats(exam, &results),
            results,
            scored_at: time::now(),
        })
    }
}

/// Per-question answer rates across the batch.
fn item_stats(exam: &Exam, results: &[GradedAttempt]) -> Vec<ItemStats> {
    let mut tally: HashMap<Uuid, (u32, u32)> = HashMap::new();
    for answer in results.iter().flat_map(|r| &r.graded) {
        let entry = tally.entry(answer.question_id).or_default();
        if !answer.submitted.is_empty() {
            entry.0 += 1;
        }
        if answer.is_correct {
            entry.1 += 1;
        }
    }

    let total = results.len() as f64;
    exam.questions
        .iter()
        .map(|q| {
            let (attempted, correct) = tally.get(&q.id).copied().unwrap_or_default();
            ItemStats {
                question_id: q.id,
                difficulty: q.difficulty,
                attempted,
                correct,
                proportion_correct: if total > 0.0 { correct as f64 / total } else { 0.0 },
            }
        })
        .collect()
}
