use aws_sdk_s3::Client as S3Client;

use bloomsense_instruments::Instrument;
use bloomsense_screening::bank::S3QuestionSource;
use bloomsense_screening::sink::S3AssessmentSink;

use crate::config::ServiceConfig;
use crate::error::ApiError;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub config: ServiceConfig,
}

impl AppState {
    pub fn assessments(&self) -> S3AssessmentSink {
        S3AssessmentSink::new(self.s3.clone(), self.config.bucket.clone())
    }

    pub fn question_source(&self) -> S3QuestionSource {
        S3QuestionSource::new(
            self.s3.clone(),
            self.config.bucket.clone(),
            self.config.question_bank_key.clone(),
        )
    }

    pub fn instrument(&self) -> Result<Box<dyn Instrument>, ApiError> {
        Ok(bloomsense_instruments::require_instrument(
            &self.config.instrument_id,
        )?)
    }
}
