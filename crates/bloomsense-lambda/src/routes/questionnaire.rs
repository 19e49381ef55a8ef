use axum::Json;
use axum::extract::State;
use serde_json::Value;

use bloomsense_instruments::normalize::normalize_questions;
use bloomsense_screening::bank::{BankOrigin, QuestionBank, load_question_bank};

use crate::error::ApiError;
use crate::state::AppState;

/// The question bank for new screenings. Always answers: an unavailable or
/// broken bank is replaced by the instrument's built-in questions.
pub async fn get_questions(State(state): State<AppState>) -> Result<Json<QuestionBank>, ApiError> {
    let instrument = state.instrument()?;
    let bank = load_question_bank(&state.question_source(), instrument.as_ref()).await;
    Ok(Json(bank))
}

/// Replace the stored question bank. Records are normalized first, so a
/// bank that would trigger the fallback is rejected here instead.
pub async fn publish_questions(
    State(state): State<AppState>,
    Json(records): Json<Vec<Value>>,
) -> Result<Json<QuestionBank>, ApiError> {
    let instrument = state.instrument()?;
    let questions = normalize_questions(&records)?;
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "a question bank needs at least one question".to_string(),
        ));
    }

    state.question_source().publish(&questions).await?;

    Ok(Json(QuestionBank {
        instrument_id: instrument.id().to_string(),
        questions,
        origin: BankOrigin::Provider,
        fallback_reason: None,
    }))
}
