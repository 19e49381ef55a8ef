use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("question record {index} is malformed: {reason}")]
    MalformedQuestion { index: usize, reason: String },

    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),
}
