#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use uuid::Uuid;

use bloomsense_core::models::assessment::NewAssessment;
use bloomsense_screening::bank::QuestionSource;
use bloomsense_screening::error::SinkError;
use bloomsense_screening::sink::AssessmentSink;

/// Sink that keeps rows in memory and can be told to fail a number of times
/// before succeeding.
#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<(Uuid, NewAssessment)>>,
    failures_left: AtomicUsize,
    attempts: AtomicUsize,
}

impl MemorySink {
    pub fn failing(times: usize) -> Self {
        Self {
            failures_left: AtomicUsize::new(times),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<(Uuid, NewAssessment)> {
        self.rows.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl AssessmentSink for MemorySink {
    async fn insert_assessment(&self, assessment: &NewAssessment) -> Result<Uuid, SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(SinkError::Rejected("sink unavailable".to_string()));
        }

        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push((id, assessment.clone()));
        Ok(id)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("provider offline")]
pub struct Offline;

/// Source returning a fixed set of records.
pub struct FixedSource(pub Vec<Value>);

impl QuestionSource for FixedSource {
    type Error = Infallible;

    async fn fetch_questions(&self) -> Result<Vec<Value>, Infallible> {
        Ok(self.0.clone())
    }
}

/// Source that always errors.
pub struct OfflineSource;

impl QuestionSource for OfflineSource {
    type Error = Offline;

    async fn fetch_questions(&self) -> Result<Vec<Value>, Offline> {
        Err(Offline)
    }
}
