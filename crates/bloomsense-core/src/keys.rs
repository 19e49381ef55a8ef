//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the BloomSense bucket.

use uuid::Uuid;

use crate::error::CoreError;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub const QUESTION_BANK: &str = "questionnaire/questions.json";

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}

/// Recover the assessment id from a key produced by [`assessment`].
pub fn assessment_id(key: &str) -> Result<Uuid, CoreError> {
    let id = key
        .strip_prefix(ASSESSMENTS_PREFIX)
        .and_then(|rest| rest.strip_suffix(".json"))
        .ok_or_else(|| CoreError::InvalidKey(key.to_string()))?;
    Ok(Uuid::parse_str(id)?)
}
