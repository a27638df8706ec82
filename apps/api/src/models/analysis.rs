use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overall resume score. Only values in `[Score::MIN, Score::MAX]` can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Score(u8);

#[derive(Debug, Error, PartialEq)]
#[error("score {0} is outside {min}..={max}", min = Score::MIN, max = Score::MAX)]
pub struct ScoreOutOfRange(pub u32);

impl Score {
    pub const MIN: u8 = 60;
    pub const MAX: u8 = 100;
    pub const LOWEST: Score = Score(Self::MIN);

    pub fn new(value: u32) -> Result<Self, ScoreOutOfRange> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        score.0 as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keywords from the job description, split by whether the resume covers them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
}

/// One feedback panel. Order in `AnalysisResult::feedback` is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub description: String,
}

/// A single analysis outcome. Produced fresh per request and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: Score,
    pub keywords: KeywordReport,
    pub feedback: Vec<FeedbackItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub career_paths: Vec<CareerPath>,
}

impl AnalysisResult {
    pub fn matching_keywords(&self) -> &[String] {
        &self.keywords.matching
    }

    pub fn missing_keywords(&self) -> &[String] {
        &self.keywords.missing
    }

    pub fn feedback_items(&self) -> &[FeedbackItem] {
        &self.feedback
    }
}
