use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use bloomsense_audit::events::{AuditAction, AuditEvent};
use bloomsense_core::models::assessment::AssessmentRecord;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_assessments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentRecord>>, ApiError> {
    Ok(Json(state.assessments().list_assessments().await?))
}

pub async fn list_patient_assessments(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<AssessmentRecord>>, ApiError> {
    let records = state
        .assessments()
        .list_patient_assessments(&patient_id)
        .await?;
    Ok(Json(records))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRecord>, ApiError> {
    let record = state.assessments().get_assessment(id).await?;
    AuditEvent::new(
        AuditAction::Read,
        "assessment",
        id.to_string(),
        &record.assessment.patient_id,
    )
    .emit();
    Ok(Json(record))
}
