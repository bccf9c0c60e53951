//! OCR Types
//!
//! Normalized result/error types for the OCR client, plus the wire types of
//! the OCR.space parse response.

use serde::Deserialize;

/// Image handed to the OCR provider
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Path to a temporarily persisted upload; the provider streams its bytes
    /// as a multipart file part.
    File(std::path::PathBuf),
    /// Base64-encoded image content, with or without a data-URI prefix.
    Base64(String),
}

/// Normalized OCR result
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// Trimmed concatenation of every parsed result's text, in provider order.
    pub text: String,
    /// Whether the provider reported overlay metadata for the first parsed
    /// result. Not a score; the name mirrors the upstream response shape.
    pub confidence: bool,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR_SPACE_API_KEY environment variable not set")]
    ApiKeyMissing,

    /// Transport failure: timeout, connection error, non-2xx status, or an
    /// unparseable response body.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error reported by the provider itself, surfaced verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("No text could be extracted from the image")]
    NoText,

    #[error("Processing error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// OCR.space wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    #[serde(rename = "ParsedResults", default)]
    pub parsed_results: Vec<ParsedResult>,

    #[serde(rename = "IsErroredOnProcessing", default)]
    pub is_errored_on_processing: bool,

    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    pub parsed_text: String,

    #[serde(rename = "TextOverlay", default)]
    pub text_overlay: Option<TextOverlay>,
}

#[derive(Debug, Deserialize)]
pub struct TextOverlay {
    #[serde(rename = "HasOverlay", default)]
    pub has_overlay: bool,
}

/// OCR.space emits `ErrorMessage` as either a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn into_message(self) -> String {
        match self {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join("; "),
        }
    }
}
