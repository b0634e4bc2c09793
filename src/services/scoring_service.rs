use crate::error::{Error, Result};
use crate::models::policy::{RawScoreRule, ScalingMode, ScoringPolicy};
use crate::models::score::{AttemptScore, EvaluationOutcome, PopulationStats};
use crate::utils::stats::{mean, sample_std_dev, z_score};

pub const SCALE_MIN: f64 = 0.0;
pub const SCALE_MAX: f64 = 1000.0;
pub const SCALE_CENTER: f64 = 500.0;
pub const POINTS_PER_STD_DEV: f64 = 110.0;

pub const RATIO_FLOOR: f64 = 200.0;

/// Aggregates outcomes and maps raw scores onto the reported scale.
///
/// One instance carries exactly one [`ScalingMode`], so every attempt scaled through it
/// within a batch shares the same scheme. Rounding is half away from zero (`f64::round`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringService {
    policy: ScoringPolicy,
}

impl ScoringService {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Unweighted aggregation: raw score is the number of correct outcomes.
    pub fn aggregate(outcomes: &[EvaluationOutcome]) -> AttemptScore {
        Self::aggregate_with(RawScoreRule::Count, outcomes)
    }

    pub fn aggregate_with(rule: RawScoreRule, outcomes: &[EvaluationOutcome]) -> AttemptScore {
        let correct_count = outcomes.iter().filter(|o| o.is_correct).count() as u32;
        let wrong_count = outcomes.len() as u32 - correct_count;

        let raw_score = match rule {
            RawScoreRule::Count => correct_count as f64,
            RawScoreRule::DifficultyWeighted => outcomes
                .iter()
                .filter(|o| o.is_correct)
                .map(|o| o.difficulty)
                .sum(),
        };

        AttemptScore {
            correct_count,
            wrong_count,
            raw_score,
            scaled_score: None,
        }
    }

    /// Norm-referenced scaling of one raw score against its comparison population.
    pub fn scale(attempt_raw: f64, population: &[f64], max_possible: f64) -> Result<f64> {
        if population.is_empty() {
            return Err(Error::InvalidPopulation);
        }

        if population.len() < 2 {
            return Ok(linear(attempt_raw, max_possible, SCALE_MIN));
        }

        match z_score(attempt_raw, population) {
            Some(z) => Ok(clamp_round(SCALE_CENTER + z * POINTS_PER_STD_DEV)),
            // Identical scores: a flat population with no defined maximum counts as average.
            None => Ok(linear(attempt_raw, max_possible, SCALE_CENTER)),
        }
    }

    /// Criterion-referenced scaling: share of `max_possible` mapped onto [200, 1000].
    pub fn scale_ratio(attempt_raw: f64, population: &[f64], max_possible: f64) -> Result<f64> {
        if population.is_empty() {
            return Err(Error::InvalidPopulation);
        }
        if max_possible <= 0.0 {
            return Ok(RATIO_FLOOR);
        }

        let scaled = RATIO_FLOOR + attempt_raw / max_possible * (SCALE_MAX - RATIO_FLOOR);
        Ok(scaled.clamp(RATIO_FLOOR, SCALE_MAX).round())
    }

    pub fn scale_with(
        mode: ScalingMode,
        attempt_raw: f64,
        population: &[f64],
        max_possible: f64,
    ) -> Result<f64> {
        match mode {
            ScalingMode::ZScore => Self::scale(attempt_raw, population, max_possible),
            ScalingMode::Ratio => Self::scale_ratio(attempt_raw, population, max_possible),
        }
    }

    pub fn score(&self, outcomes: &[EvaluationOutcome]) -> AttemptScore {
        Self::aggregate_with(self.policy.raw_score_rule, outcomes)
    }

    /// Scales every member of `scores` against the whole set in a single pass.
    ///
    /// Scaled scores depend on every other member, so callers rerun this over the full
    /// set whenever any raw score changes.
    pub fn scale_population(&self, scores: &mut [AttemptScore], max_possible: f64) -> Result<()> {
        let population: Vec<f64> = scores.iter().map(|s| s.raw_score).collect();
        for score in scores.iter_mut() {
            score.scaled_score = Some(Self::scale_with(
                self.policy.scaling_mode,
                score.raw_score,
                &population,
                max_possible,
            )?);
        }
        Ok(())
    }

    pub fn population_stats(population: &[f64]) -> Result<PopulationStats> {
        let avg = mean(population).ok_or(Error::InvalidPopulation)?;
        Ok(PopulationStats {
            count: population.len(),
            mean: avg,
            std_dev: sample_std_dev(population),
            min: population.iter().copied().fold(f64::INFINITY, f64::min),
            max: population.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

fn linear(attempt_raw: f64, max_possible: f64, no_max_default: f64) -> f64 {
    if max_possible > 0.0 {
        clamp_round(attempt_raw / max_possible * SCALE_MAX)
    } else {
        no_max_default
    }
}

fn clamp_round(scaled: f64) -> f64 {
    if scaled.is_nan() {
        return SCALE_CENTER;
    }
    scaled.clamp(SCALE_MIN, SCALE_MAX).round()
}
