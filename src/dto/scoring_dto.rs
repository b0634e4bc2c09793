use crate::models::exam::{Attempt, Exam};
use crate::models::policy::{RawScoreRule, ScalingMode, ScoringPolicy};
use crate::models::score::{GradedAttempt, ItemStats, PopulationStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Every attempt on one exam/period that takes part in normalization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreBatchRequest {
    #[validate(nested)]
    pub exam: Exam,
    #[validate(nested)]
    pub attempts: Vec<Attempt>,
    /// Overrides the service default for this batch only.
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBatchResponse {
    pub exam_id: Uuid,
    pub period_id: Uuid,
    pub scaling_mode: ScalingMode,
    pub raw_score_rule: RawScoreRule,
    pub max_possible: f64,
    pub population: PopulationStats,
    pub results: Vec<GradedAttempt>,
    pub items: Vec<ItemStats>,
    pub scored_at: DateTime<Utc>,
}
