//! Upload Routes
//!
//! HTTP endpoints for OCR upload processing.
//!
//! Endpoints:
//! - POST /api/upload - multipart file upload
//! - POST /api/upload-base64 - JSON body with a base64-encoded image

use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::ocr::ImageSource;
use crate::state::AppState;
use crate::upload::{allowed_file, sanitize_filename, TempUpload};

/// Success response body shared by both upload modes
#[derive(Serialize)]
pub struct UploadResponse {
    success: bool,
    text: String,
    message: &'static str,
}

impl UploadResponse {
    fn extracted(text: String) -> Self {
        Self {
            success: true,
            text,
            message: "Text extracted successfully!",
        }
    }
}

#[derive(Deserialize)]
pub struct Base64Upload {
    #[serde(default)]
    image: Option<String>,
}

/// POST /api/upload
///
/// Validate the multipart upload, persist it to the upload directory for the
/// duration of the OCR call, and relay the result. The temp file is removed
/// on every exit path.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    tracing::info!("upload request received");
    let max_bytes = state.config().upload.max_bytes;

    // A request that is not multipart at all carries no file either.
    let mut multipart =
        multipart.map_err(|_| AppError::BadRequest("No file provided".to_string()))?;

    let mut file: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, max_bytes))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| map_multipart_error(e, max_bytes))?;
        file = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = file else {
        tracing::error!("no file in request");
        return Err(AppError::BadRequest("No file provided".to_string()));
    };
    tracing::info!(filename = %filename, size = bytes.len(), "file received");

    if filename.is_empty() {
        tracing::error!("empty filename");
        return Err(AppError::BadRequest("No file selected".to_string()));
    }

    if !allowed_file(&filename) {
        tracing::error!(filename = %filename, "file type not allowed");
        return Err(AppError::BadRequest(
            "File type not allowed. Use PNG, JPG, JPEG, GIF, or BMP.".to_string(),
        ));
    }

    let temp = TempUpload::write(
        &state.config().upload.dir,
        &sanitize_filename(&filename),
        &bytes,
    )
    .await?;

    tracing::info!("starting OCR processing");
    let result = state
        .ocr()
        .recognize(ImageSource::File(temp.path().to_path_buf()))
        .await;
    drop(temp);

    let recognition = result?;
    tracing::info!(chars = recognition.text.len(), confidence = recognition.confidence, "OCR complete");
    Ok(Json(UploadResponse::extracted(recognition.text)))
}

/// POST /api/upload-base64
///
/// Relay a base64-encoded image to the OCR provider. Any data-URI prefix is
/// handled by the OCR client, so the payload is passed through as received.
pub async fn upload_base64(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Base64Upload>, JsonRejection>,
) -> Result<Json<UploadResponse>> {
    let max_bytes = state.config().upload.max_bytes;

    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { max_bytes }
        } else {
            AppError::BadRequest("No image data provided".to_string())
        }
    })?;

    let Some(image) = body.image else {
        return Err(AppError::BadRequest("No image data provided".to_string()));
    };

    tracing::info!(payload_len = image.len(), "base64 upload received");
    let recognition = state.ocr().recognize(ImageSource::Base64(image)).await?;
    Ok(Json(UploadResponse::extracted(recognition.text)))
}

/// Body-limit violations map to the 413 envelope; everything else a broken
/// multipart stream can produce is a client error.
fn map_multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { max_bytes }
    } else {
        AppError::BadRequest(err.body_text())
    }
}
