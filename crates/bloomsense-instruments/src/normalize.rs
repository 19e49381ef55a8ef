//! Question-bank record normalization.
//!
//! Question banks have been stored under a few different column names over
//! time (`question_id`/`question_text`/`question_order` from the
//! questionnaire table, `id`/`question` from the screening UI). Every shape
//! is folded into [`Question`] here so nothing downstream has to guess.

use std::collections::HashSet;

use serde_json::{Map, Value};

use bloomsense_core::models::question::Question;

use crate::error::InstrumentError;

const ID_FIELDS: &[&str] = &["id", "question_id"];
const TEXT_FIELDS: &[&str] = &["text", "question_text", "question"];
const ORDER_FIELDS: &[&str] = &["order", "question_order"];
const CRITICAL_FIELDS: &[&str] = &["critical", "critical_item"];

/// Normalize raw provider records into questions.
///
/// Fails on the first malformed record or on a repeated id; the caller
/// decides what to fall back to.
pub fn normalize_questions(records: &[Value]) -> Result<Vec<Question>, InstrumentError> {
    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let question = normalize_record(record)
            .map_err(|reason| InstrumentError::MalformedQuestion { index, reason })?;
        if !seen.insert(question.id.clone()) {
            return Err(InstrumentError::DuplicateQuestionId(question.id));
        }
        questions.push(question);
    }

    Ok(questions)
}

/// Question ids must be unique within a set: answers are keyed by id, so a
/// repeated id would score one answer twice.
pub fn check_unique_ids(questions: &[Question]) -> Result<(), InstrumentError> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id.as_str()) {
            return Err(InstrumentError::DuplicateQuestionId(question.id.clone()));
        }
    }
    Ok(())
}

fn normalize_record(record: &Value) -> Result<Question, String> {
    let obj = record
        .as_object()
        .ok_or_else(|| "record is not an object".to_string())?;

    let id = match first_field(obj, ID_FIELDS) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        Some(other) => return Err(format!("unusable id {other}")),
        None => return Err("missing id".to_string()),
    };

    let text = match first_field(obj, TEXT_FIELDS) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(_) => return Err(format!("question {id} has empty or non-text wording")),
        None => return Err(format!("question {id} has no text")),
    };

    let order = match first_field(obj, ORDER_FIELDS) {
        None => None,
        Some(v) => Some(
            v.as_i64()
                .ok_or_else(|| format!("question {id} has non-integer order {v}"))?,
        ),
    };

    let critical = match first_field(obj, CRITICAL_FIELDS) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(v) => return Err(format!("question {id} has non-boolean critical flag {v}")),
    };

    Ok(Question {
        id,
        text,
        order,
        critical,
    })
}

/// First alias present with a non-null value.
fn first_field<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|v| !v.is_null())
}
