use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::{AnswerSet, Question};
use super::screening::{RiskLevel, ScoringResult};

/// An assessment that has been scored but not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAssessment {
    pub patient_id: String,
    pub mchat_questions: Vec<Question>,
    pub mchat_answers: AnswerSet,
    pub behavior_notes: Option<String>,
    pub total_questions: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub risk_level: RiskLevel,
    pub screen_positive: bool,
}

impl NewAssessment {
    /// Shape a scoring result into its persisted form. Blank notes are
    /// stored as absent.
    pub fn from_result(
        patient_id: impl Into<String>,
        result: &ScoringResult,
        behavior_notes: Option<&str>,
    ) -> Self {
        let mchat_answers = result
            .items
            .iter()
            .filter_map(|item| {
                item.answer
                    .as_ref()
                    .map(|a| (item.question.id.clone(), a.clone()))
            })
            .collect();

        Self {
            patient_id: patient_id.into(),
            mchat_questions: result.items.iter().map(|i| i.question.clone()).collect(),
            mchat_answers,
            behavior_notes: behavior_notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            total_questions: result.total_questions,
            pass_count: result.pass_count,
            fail_count: result.fail_count,
            risk_level: result.risk_level,
            screen_positive: result.screen_positive,
        }
    }
}

/// A stored assessment row. `id` is assigned by the sink on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub assessment: NewAssessment,
    pub created_at: jiff::Timestamp,
}
