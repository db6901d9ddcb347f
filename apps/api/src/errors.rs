use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The body is always `{"success": false, "message": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded: expected a multipart field named 'resume'")]
    NoFileProvided,

    #[error("Invalid upload: {message}")]
    InvalidUpload { status: StatusCode, message: String },

    #[error("Unsupported file type: {0} (expected .pdf or .docx)")]
    UnsupportedFileType(String),

    #[error("{0}")]
    TextExtractionFailed(ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::UnsupportedFileType(name) => AppError::UnsupportedFileType(name),
            other => AppError::TextExtractionFailed(other),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::InvalidUpload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(e).context("Failed to store uploaded file"))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoFileProvided => StatusCode::BAD_REQUEST,
            AppError::InvalidUpload { status, .. } => *status,
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::TextExtractionFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::TextExtractionFailed(e) => tracing::error!("Text extraction failed: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::warn!("Rejected upload: {other}"),
        }

        let body = Json(json!({
            "success": false,
            "message": self.client_message()
        }));

        (self.status(), body).into_response()
    }
}
