use serde::Serialize;
use uuid::Uuid;

use bloomsense_audit::events::{AuditAction, AuditEvent};
use bloomsense_core::models::assessment::NewAssessment;
use bloomsense_core::models::screening::ScoringResult;

use crate::error::ScreeningError;
use crate::session::{ScreeningSession, ScreeningStage};
use crate::sink::AssessmentSink;

/// What a call to [`AssessmentRecorder::record_if_absent`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// A new assessment was written.
    Created { assessment_id: Uuid },
    /// The marker was already set; nothing was written.
    AlreadyRecorded { assessment_id: Uuid },
    /// The sink failed. The marker is still unset, so a later call retries.
    Failed { reason: String },
}

impl RecordOutcome {
    pub fn assessment_id(&self) -> Option<Uuid> {
        match self {
            RecordOutcome::Created { assessment_id }
            | RecordOutcome::AlreadyRecorded { assessment_id } => Some(*assessment_id),
            RecordOutcome::Failed { .. } => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.assessment_id().is_some()
    }
}

/// Writes a scored screening to the sink at most once.
///
/// The "already saved" marker belongs to the caller and is scoped to one
/// screening encounter. Persistence is best effort: a failed write is logged
/// and reported in the outcome, never raised, so the result stays usable.
pub struct AssessmentRecorder<S> {
    sink: S,
}

impl<S: AssessmentSink> AssessmentRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn record_if_absent(
        &self,
        marker: &mut Option<Uuid>,
        patient_id: &str,
        result: &ScoringResult,
        behavior_notes: Option<&str>,
    ) -> RecordOutcome {
        if let Some(assessment_id) = *marker {
            tracing::debug!(%assessment_id, patient_id, "assessment already recorded, skipping");
            return RecordOutcome::AlreadyRecorded { assessment_id };
        }

        let assessment = NewAssessment::from_result(patient_id, result, behavior_notes);
        match self.sink.insert_assessment(&assessment).await {
            Ok(assessment_id) => {
                *marker = Some(assessment_id);
                tracing::info!(
                    %assessment_id,
                    patient_id,
                    risk_level = %assessment.risk_level,
                    fail_count = assessment.fail_count,
                    "assessment saved"
                );
                AuditEvent::new(
                    AuditAction::Created,
                    "assessment",
                    assessment_id.to_string(),
                    patient_id,
                )
                .with_details(serde_json::json!({
                    "risk_level": assessment.risk_level,
                    "screen_positive": assessment.screen_positive,
                }))
                .emit();
                RecordOutcome::Created { assessment_id }
            }
            Err(e) => {
                tracing::warn!(patient_id, error = %e, "failed to save assessment");
                RecordOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Record a finished session using its own marker, patient and notes.
    pub async fn record_session(
        &self,
        session: &mut ScreeningSession,
    ) -> Result<RecordOutcome, ScreeningError> {
        let actual = session.stage();
        let (marker, patient_id, result, notes) =
            session
                .record_parts()
                .ok_or(ScreeningError::WrongStage {
                    expected: ScreeningStage::Complete,
                    actual,
                })?;
        Ok(self.record_if_absent(marker, patient_id, result, notes).await)
    }
}
