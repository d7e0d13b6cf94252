use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classification::label_decoder::DecodeError;
use crate::classification::pipeline::PipelineError;
use crate::extraction::ExtractionError;
use crate::models::UnsupportedFormatError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Uploaded file exceeds the size limit")]
    PayloadTooLarge,

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::UnsupportedFormat(e) => AppError::UnsupportedFormat(e),
            PipelineError::Extraction(e) => AppError::Extraction(e),
            PipelineError::Decode(e) => AppError::Decode(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::UnsupportedFormat(e) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                e.to_string(),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    e.to_string(),
                )
            }
            AppError::Decode(e) => {
                // Classifier and label encoder artifacts are out of sync.
                tracing::error!("Model artifact mismatch: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_MISMATCH",
                    "The classifier returned a category the label encoder does not know. \
                     The model artifacts are out of sync."
                        .to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
