use std::future::Future;

use aws_sdk_s3::Client;
use serde::Serialize;
use serde_json::Value;

use bloomsense_core::models::question::Question;
use bloomsense_instruments::Instrument;
use bloomsense_instruments::normalize::normalize_questions;
use bloomsense_storage::error::StorageError;
use bloomsense_storage::json;

use crate::error::BankError;

/// Supplies raw question records. Normalization happens in
/// [`load_question_bank`], not in the source.
pub trait QuestionSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_questions(&self) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BankOrigin {
    /// Questions came from the provider.
    Provider,
    /// The instrument's built-in set was used instead.
    Fallback,
}

/// The questions a screening session will use.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    pub instrument_id: String,
    pub questions: Vec<Question>,
    pub origin: BankOrigin,
    /// Why the provider's questions were not used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl QuestionBank {
    pub fn fallback(instrument: &dyn Instrument, reason: impl Into<String>) -> Self {
        Self {
            instrument_id: instrument.id().to_string(),
            questions: instrument.default_questions().to_vec(),
            origin: BankOrigin::Fallback,
            fallback_reason: Some(reason.into()),
        }
    }
}

/// Fetch and normalize questions, falling back to the instrument's
/// built-in set when the provider errors, returns nothing, or returns
/// anything malformed. Never fails.
pub async fn load_question_bank<Q: QuestionSource>(
    source: &Q,
    instrument: &dyn Instrument,
) -> QuestionBank {
    let records = match source.fetch_questions().await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "question bank unavailable, using built-in questions");
            return QuestionBank::fallback(instrument, format!("provider error: {e}"));
        }
    };

    if records.is_empty() {
        tracing::info!("question bank is empty, using built-in questions");
        return QuestionBank::fallback(instrument, "provider returned no questions");
    }

    match normalize_questions(&records) {
        Ok(questions) => {
            tracing::debug!(count = questions.len(), "loaded question bank");
            QuestionBank {
                instrument_id: instrument.id().to_string(),
                questions,
                origin: BankOrigin::Provider,
                fallback_reason: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "question bank is malformed, using built-in questions");
            QuestionBank::fallback(instrument, e.to_string())
        }
    }
}

/// Question bank stored as JSON in the bucket, either a bare array of
/// records or `{ "questions": [...] }`.
#[derive(Clone)]
pub struct S3QuestionSource {
    client: Client,
    bucket: String,
    key: String,
}

impl S3QuestionSource {
    pub fn new(client: Client, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Replace the stored bank with already-normalized questions.
    pub async fn publish(&self, questions: &[Question]) -> Result<(), StorageError> {
        let body = serde_json::json!({ "questions": questions });
        json::put_json(&self.client, &self.bucket, &self.key, &body).await?;
        tracing::info!(count = questions.len(), key = %self.key, "published question bank");
        Ok(())
    }
}

impl QuestionSource for S3QuestionSource {
    type Error = BankError;

    async fn fetch_questions(&self) -> Result<Vec<Value>, BankError> {
        let doc: Value = match json::get_json(&self.client, &self.bucket, &self.key).await {
            Ok(doc) => doc,
            Err(StorageError::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        records_from_document(doc)
    }
}

fn records_from_document(doc: Value) -> Result<Vec<Value>, BankError> {
    match doc {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("questions") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(BankError::Shape(format!(
                "\"questions\" is not an array: {other}"
            ))),
            None => Err(BankError::Shape("missing \"questions\" array".to_string())),
        },
        other => Err(BankError::Shape(format!("expected array or object, got {other}"))),
    }
}
