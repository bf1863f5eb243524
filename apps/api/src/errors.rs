use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing upload: {0}")]
    MissingField(String),

    #[error("Invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text: {0}")]
    ExtractionFailed(String),

    #[error("Model call failed: {0}")]
    ModelCall(#[from] LlmError),

    #[error("Model response was not valid JSON: {0}")]
    ResponseParse(String),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(what) => AppError::UnsupportedFormat(what),
            other => AppError::ExtractionFailed(other.to_string()),
        }
    }
}

/// Uniform failure payload returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelCall(_) | AppError::ResponseParse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            AppError::MissingField(field) => {
                ("Missing upload", format!("multipart field '{field}' is required"))
            }
            AppError::Multipart(e) => ("Invalid multipart request", e.body_text()),
            AppError::UnsupportedFormat(what) => ("Unsupported file format", what.clone()),
            AppError::ExtractionFailed(msg) => ("Could not extract text", msg.clone()),
            AppError::ModelCall(e) => ("Could not process skill analysis", e.to_string()),
            AppError::ResponseParse(msg) => ("Could not process skill analysis", msg.clone()),
        };
        ErrorBody {
            error: error.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ModelCall(e) => tracing::error!("Model call error: {e}"),
            AppError::ResponseParse(msg) => tracing::error!("Model response parse error: {msg}"),
            other => tracing::warn!("Rejected analysis request: {other}"),
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let err: AppError = ExtractError::UnsupportedFormat("resume.doc".into()).into();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.body().error, "Unsupported file format");
        assert_eq!(err.body().details, "resume.doc");
    }

    #[test]
    fn test_model_errors_map_to_bad_gateway() {
        let err = AppError::ModelCall(LlmError::EmptyContent);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.body().error, "Could not process skill analysis");

        let err = AppError::ResponseParse("expected value at line 1 column 1".into());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.body().details, "expected value at line 1 column 1");
    }

    #[test]
    fn test_missing_field_details_name_the_field() {
        let body = AppError::MissingField("resume".into()).body();
        assert!(body.details.contains("'resume'"));
    }
}
