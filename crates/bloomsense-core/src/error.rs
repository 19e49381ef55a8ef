use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid answer '{0}': expected \"yes\" or \"no\"")]
    InvalidAnswer(String),

    #[error("not an assessment key: {0}")]
    InvalidKey(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
