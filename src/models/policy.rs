use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a raw score is derived from evaluation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawScoreRule {
    #[default]
    Count,
    /// Sum of difficulty over correct answers only.
    DifficultyWeighted,
}

/// How a raw score is mapped onto the reported scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Norm-referenced: population mean maps to 500, one standard deviation to 110 points.
    #[default]
    ZScore,
    /// Criterion-referenced: share of `max_possible` mapped onto [200, 1000].
    Ratio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub scaling_mode: ScalingMode,
    #[serde(default)]
    pub raw_score_rule: RawScoreRule,
}

impl FromStr for RawScoreRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(RawScoreRule::Count),
            "difficulty_weighted" | "weighted" => Ok(RawScoreRule::DifficultyWeighted),
            other => Err(Error::Config(format!("Unknown raw score rule: {}", other))),
        }
    }
}

impl FromStr for ScalingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "z_score" | "zscore" => Ok(ScalingMode::ZScore),
            "ratio" => Ok(ScalingMode::Ratio),
            other => Err(Error::Config(format!("Unknown scaling mode: {}", other))),
        }
    }
}
