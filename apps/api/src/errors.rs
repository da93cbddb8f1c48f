use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::DocumentParseError;
use crate::scoring::ScoringError;

/// Which of the two required analysis inputs was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Document,
    JobDescription,
}

impl MissingInput {
    pub fn user_message(self) -> &'static str {
        match self {
            MissingInput::Document => "Please upload a resume file.",
            MissingInput::JobDescription => "Please provide a job description.",
        }
    }

    fn code(self) -> &'static str {
        match self {
            MissingInput::Document => "MISSING_DOCUMENT",
            MissingInput::JobDescription => "MISSING_JOB_DESCRIPTION",
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0:?}")]
    MissingInput(MissingInput),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    DocumentParse(#[from] DocumentParseError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Scoring timed out after {0:?}")]
    Timeout(Duration),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Timeout(after) => AppError::Timeout(after),
            other => AppError::ModelUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(missing) => (
                StatusCode::BAD_REQUEST,
                missing.code(),
                missing.user_message().to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!(
                    "Resume file is too large. Uploads are limited to {} KiB.",
                    limit / 1024
                ),
            ),
            AppError::DocumentParse(e) => {
                tracing::warn!("Document parse error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_PARSE_ERROR",
                    "Please upload a valid resume.".to_string(),
                )
            }
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "The resume could not be analyzed right now. Please try again.".to_string(),
                )
            }
            AppError::Timeout(after) => {
                tracing::error!("Scoring timed out after {after:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "SCORING_TIMEOUT",
                    "The analysis took too long. Please try again.".to_string(),
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
