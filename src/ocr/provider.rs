//! OCR Providers
//!
//! Defines the provider trait and the OCR.space implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::config::OcrConfig;

use super::types::{ImageSource, OcrError, ParseResponse, Recognition};

/// Form options sent with every parse request. Engine 2 handles handwriting
/// better than the default; overlay and searchable-PDF output stay off.
const FORM_OPTIONS: &[(&str, &str)] = &[
    ("OCREngine", "2"),
    ("isOverlayRequired", "false"),
    ("filetype", "AUTO"),
    ("detectOrientation", "true"),
    ("isCreateSearchablePdf", "false"),
    ("isSearchablePdfHideTextLayer", "false"),
    ("scale", "true"),
    ("isTable", "false"),
];

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Perform OCR on an image
    async fn recognize(&self, source: ImageSource) -> Result<Recognition, OcrError>;
}

/// OCR.space hosted API provider
pub struct OcrSpaceProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl OcrSpaceProvider {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl OcrProviderTrait for OcrSpaceProvider {
    async fn recognize(&self, source: ImageSource) -> Result<Recognition, OcrError> {
        let api_key = self.api_key.as_deref().ok_or(OcrError::ApiKeyMissing)?;
        let request = self.client.post(&self.endpoint).timeout(self.timeout);

        let response = match source {
            ImageSource::File(path) => {
                let bytes = tokio::fs::read(&path).await?;
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("upload")
                    .to_string();

                let mut form = Form::new().text("apikey", api_key.to_string());
                for (key, value) in FORM_OPTIONS {
                    form = form.text(*key, *value);
                }
                form = form.part("file", Part::bytes(bytes).file_name(filename));

                request.multipart(form).send().await?
            }
            ImageSource::Base64(data) => {
                let image = base64_image_value(&data);
                let mut params: Vec<(&str, &str)> = vec![("apikey", api_key)];
                params.extend_from_slice(FORM_OPTIONS);
                params.push(("base64Image", image.as_str()));

                request.form(&params).send().await?
            }
        };

        let parsed: ParseResponse = response.error_for_status()?.json().await?;
        normalize(parsed)
    }
}

/// Render the `base64Image` form value. Any data-URI prefix already on the
/// caller's input is stripped first so it is not double-prefixed.
fn base64_image_value(data: &str) -> String {
    format!("data:image/jpeg;base64,{}", strip_data_uri_prefix(data))
}

/// Drop a `data:<mime>;base64,` header from a base64 payload, if present.
fn strip_data_uri_prefix(data: &str) -> &str {
    data.split_once(',').map_or(data, |(_, rest)| rest)
}

/// Shape the provider's parse response into a normalized result.
fn normalize(response: ParseResponse) -> Result<Recognition, OcrError> {
    if response.is_errored_on_processing {
        let message = response
            .error_message
            .map(|m| m.into_message())
            .unwrap_or_else(|| "Unknown OCR processing error".to_string());
        tracing::error!(error = %message, "OCR processing error");
        return Err(OcrError::Provider(message));
    }

    let extracted: String = response
        .parsed_results
        .iter()
        .map(|result| result.parsed_text.as_str())
        .collect();

    let text = extracted.trim();
    if text.is_empty() {
        return Err(OcrError::NoText);
    }

    let confidence = response
        .parsed_results
        .first()
        .and_then(|result| result.text_overlay.as_ref())
        .map_or(false, |overlay| overlay.has_overlay);

    Ok(Recognition {
        text: text.to_string(),
        confidence,
    })
}

/// Mock provider for testing
#[cfg(test)]
pub(crate) struct MockProvider {
    outcome: MockOutcome,
    /// Every source the provider saw, with whether the file (when file mode)
    /// still existed on disk at call time.
    pub(crate) calls: std::sync::Mutex<Vec<(ImageSource, bool)>>,
}

#[cfg(test)]
pub(crate) enum MockOutcome {
    Text(String),
    ProviderError(String),
    NoText,
}

#[cfg(test)]
impl MockProvider {
    pub(crate) fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    async fn recognize(&self, source: ImageSource) -> Result<Recognition, OcrError> {
        let on_disk = match &source {
            ImageSource::File(path) => path.exists(),
            ImageSource::Base64(_) => false,
        };
        self.calls.lock().unwrap().push((source, on_disk));

        match &self.outcome {
            MockOutcome::Text(text) => Ok(Recognition {
                text: text.clone(),
                confidence: false,
            }),
            MockOutcome::ProviderError(message) => Err(OcrError::Provider(message.clone())),
            MockOutcome::NoText => Err(OcrError::NoText),
        }
    }
}
