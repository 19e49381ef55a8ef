//! bloomsense-instruments
//!
//! Screening instrument definitions and scoring. Pure logic, no AWS
//! dependency, no I/O.

pub mod error;
pub mod instruments;
pub mod normalize;
pub mod scoring;

use bloomsense_core::models::question::{AnswerSet, Question};
use bloomsense_core::models::screening::ScoringResult;

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "mchat_rf").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "M-CHAT-R/F").
    fn name(&self) -> &str;

    /// The built-in question set, used whenever no question bank is
    /// available.
    fn default_questions(&self) -> &[Question];

    /// Score a completed questionnaire.
    fn score(&self, questions: &[Question], answers: &AnswerSet) -> ScoringResult;

    /// Plain-language reading of a result for clinicians.
    fn interpretation(&self, result: &ScoringResult) -> String;
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::mchat_rf::MChatRf)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Like [`get_instrument`], but an unknown ID is an error.
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, error::InstrumentError> {
    get_instrument(id).ok_or_else(|| error::InstrumentError::UnknownInstrument(id.to_string()))
}
