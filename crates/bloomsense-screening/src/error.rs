use thiserror::Error;

use bloomsense_core::error::CoreError;
use bloomsense_instruments::error::InstrumentError;
use bloomsense_storage::error::StorageError;

use crate::session::ScreeningStage;

/// Problems with what the clinician entered. Reported back synchronously;
/// nothing is scored until they are fixed.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),

    #[error(transparent)]
    InvalidAnswer(#[from] CoreError),

    #[error(transparent)]
    InvalidQuestions(#[from] InstrumentError),

    #[error("please answer all questions before proceeding ({} unanswered)", .0.len())]
    Unanswered(Vec<String>),

    #[error("please add behavior observations before completing")]
    MissingBehaviorNotes,

    #[error("screening is in the {actual} stage, expected {expected}")]
    WrongStage {
        expected: ScreeningStage,
        actual: ScreeningStage,
    },
}

/// Failure to write an assessment to the persistence sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("assessment rejected: {0}")]
    Rejected(String),
}

/// Failure to fetch a question bank from its provider.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unexpected question bank shape: {0}")]
    Shape(String),
}
