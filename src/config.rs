use crate::error::{Error, Result};
use crate::models::policy::{RawScoreRule, ScalingMode, ScoringPolicy};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scaling_mode: ScalingMode,
    pub raw_score_rule: RawScoreRule,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            scaling_mode: get_env_parse("SCALING_MODE")?.unwrap_or_default(),
            raw_score_rule: get_env_parse("RAW_SCORE_RULE")?.unwrap_or_default(),
            log_format: match env::var("LOG_FORMAT").ok().as_deref().map(str::trim) {
                None | Some("") | Some("plain") => LogFormat::Plain,
                Some("json") => LogFormat::Json,
                Some(other) => {
                    return Err(Error::Config(format!(
                        "Invalid value for LOG_FORMAT: {}",
                        other
                    )))
                }
            },
        })
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            scaling_mode: self.scaling_mode,
            raw_score_rule: self.raw_score_rule,
        }
    }
}

/// Unset or blank variables fall back to the caller's default.
fn get_env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}
