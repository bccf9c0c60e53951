//! Error types for the Scrawl server
//!
//! Every failure leaving the HTTP boundary shares the same
//! `{"success": false, "error": "..."}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ocr::OcrError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("File too large. Maximum size is {}MB.", .max_bytes / (1024 * 1024))]
    PayloadTooLarge { max_bytes: usize },

    #[error("Endpoint not found")]
    NotFound,

    #[error("{0}")]
    Ocr(#[from] OcrError),

    /// Detail is logged server-side; the caller only sees a generic message.
    #[error("Internal server error")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Uniform error response body
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Ocr(err) => {
                tracing::error!(error = %err, "OCR failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorBody {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_too_large_renders_limit_in_whole_megabytes() {
        let err = AppError::PayloadTooLarge {
            max_bytes: 16 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File too large. Maximum size is 16MB.");
    }

    #[test]
    fn internal_error_never_leaks_detail() {
        let err = AppError::Internal("db password in a panic message".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (AppError::BadRequest("nope".into()), StatusCode::BAD_REQUEST),
            (
                AppError::PayloadTooLarge { max_bytes: 1 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::Ocr(OcrError::NoText),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
