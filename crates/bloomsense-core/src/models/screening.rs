use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::question::Question;

/// Pass/fail classification of one screening item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemResult {
    Pass,
    Fail,
}

impl fmt::Display for ItemResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemResult::Pass => f.write_str("Pass"),
            ItemResult::Fail => f.write_str("Fail"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLevel {
    pub fn from_screen_positive(screen_positive: bool) -> Self {
        if screen_positive {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question together with the answer given and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredItem {
    pub question: Question,
    pub answer: Option<String>,
    pub result: ItemResult,
}

/// Outcome of scoring one completed questionnaire.
///
/// `pass_count + fail_count == total_questions == items.len()`, and
/// `risk_level` always agrees with `screen_positive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringResult {
    pub items: Vec<ScoredItem>,
    pub pass_count: usize,
    pub fail_count: usize,
    pub total_questions: usize,
    pub screen_positive: bool,
    pub risk_level: RiskLevel,
}

impl ScoringResult {
    pub fn failed_items(&self) -> impl Iterator<Item = &ScoredItem> {
        self.items.iter().filter(|i| i.result == ItemResult::Fail)
    }
}
