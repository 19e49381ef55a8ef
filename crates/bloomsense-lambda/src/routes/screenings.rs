use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bloomsense_audit::events::{AuditAction, AuditEvent};
use bloomsense_core::models::question::{AnswerSet, Question};
use bloomsense_core::models::screening::ScoringResult;
use bloomsense_export::report::{ReportFormat, export_report};
use bloomsense_export::styles::DocumentStyles;
use bloomsense_instruments::normalize::check_unique_ids;
use bloomsense_instruments::scoring;
use bloomsense_screening::bank::load_question_bank;
use bloomsense_screening::recorder::{AssessmentRecorder, RecordOutcome};
use bloomsense_screening::session::ScreeningSession;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScoreRequest {
    /// Questions to score against. Omitted means the current question bank.
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    pub result: ScoringResult,
    pub interpretation: String,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub patient_id: String,
    pub questions: Option<Vec<Question>>,
    pub answers: AnswerSet,
    #[serde(default)]
    pub behavior_notes: String,
    /// Set when this screening was already saved; the request then only
    /// re-scores and nothing new is written.
    pub assessment_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub result: ScoringResult,
    pub interpretation: String,
    pub assessment_id: Option<Uuid>,
    pub saved: bool,
    pub record: RecordOutcome,
}

#[derive(Deserialize)]
pub struct ReportRequest {
    /// Only `items` is trusted; counts and risk are recomputed from them.
    pub result: ScoringResult,
    pub behavior_notes: Option<String>,
    pub patient_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
}

async fn questions_or_bank(
    state: &AppState,
    questions: Option<Vec<Question>>,
) -> Result<Vec<Question>, ApiError> {
    match questions {
        Some(questions) => {
            check_unique_ids(&questions)?;
            Ok(questions)
        }
        None => {
            let instrument = state.instrument()?;
            let bank = load_question_bank(&state.question_source(), instrument.as_ref()).await;
            Ok(bank.questions)
        }
    }
}

/// Score answers without saving anything. Unanswered questions count as
/// passes here; use `submit_screening` for the validated workflow.
pub async fn score_screening(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let instrument = state.instrument()?;
    let questions = questions_or_bank(&state, req.questions).await?;

    let result = instrument.score(&questions, &req.answers);
    let interpretation = instrument.interpretation(&result);
    Ok(Json(ScoreResponse {
        result,
        interpretation,
    }))
}

/// Run a complete screening: validate answers and notes, score, and record
/// the assessment once. A failed save still returns the result.
pub async fn submit_screening(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    if req.patient_id.trim().is_empty() {
        return Err(ApiError::BadRequest("patient_id is required".to_string()));
    }

    let instrument = state.instrument()?;
    let questions = questions_or_bank(&state, req.questions).await?;

    let mut session = ScreeningSession::new(req.patient_id.trim(), questions)?;
    session.answer_all(req.answers.iter())?;
    session.advance()?;
    session.set_behavior_notes(req.behavior_notes)?;
    let result = session.finish()?.clone();

    let recorder = AssessmentRecorder::new(state.assessments());
    let mut marker = req.assessment_id;
    let record = recorder
        .record_if_absent(
            &mut marker,
            session.patient_id(),
            &result,
            session.behavior_notes(),
        )
        .await;

    Ok(Json(SubmitResponse {
        interpretation: instrument.interpretation(&result),
        result,
        assessment_id: marker,
        saved: record.is_saved(),
        record,
    }))
}

/// Render a scored screening as a downloadable report. Works from the
/// items in the request, re-scored here; nothing is read from storage.
pub async fn download_report(
    Query(query): Query<ReportQuery>,
    Json(req): Json<ReportRequest>,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<ReportFormat>()?,
        None => ReportFormat::default(),
    };

    let result = scoring::summarize(req.result.items);
    let report = export_report(
        format,
        &result,
        req.behavior_notes.as_deref(),
        jiff::Timestamp::now(),
        &DocumentStyles::default(),
    )?;

    if let Some(patient_id) = &req.patient_id {
        AuditEvent::new(AuditAction::Exported, "report", &report.filename, patient_id)
            .with_details(serde_json::json!({ "format": format.extension() }))
            .emit();
    }

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.body,
    )
        .into_response())
}
