use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use bloomsense_export::error::ExportError;
use bloomsense_instruments::error::InstrumentError;
use bloomsense_screening::error::ScreeningError;
use bloomsense_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Clinician input problems; unanswered questions are listed so the UI
    /// can highlight them.
    Screening(ScreeningError),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unanswered: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut unanswered = None;
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Screening(e) => {
                if let ScreeningError::Unanswered(ids) = &e {
                    unanswered = Some(ids.clone());
                }
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        let body = ErrorBody {
            error: message,
            unanswered,
        };
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ScreeningError> for ApiError {
    fn from(e: ScreeningError) -> Self {
        ApiError::Screening(e)
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::UnknownInstrument(id) => {
                ApiError::NotFound(format!("instrument not found: {id}"))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::UnsupportedFormat(format) => {
                ApiError::BadRequest(format!("unsupported report format: {format}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
