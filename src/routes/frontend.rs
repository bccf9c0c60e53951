//! Frontend serving routes
//!
//! Serves the prebuilt single-page app from the frontend build directory:
//! `index.html` at `/`, the favicon, and hashed assets under `/static/`.

use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::Response,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve the SPA entry point
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    serve(state.config().frontend.build_dir.join("index.html")).await
}

pub async fn favicon(State(state): State<AppState>) -> Result<Response> {
    serve(state.config().frontend.build_dir.join("favicon.ico")).await
}

/// Serve a static asset from the build directory
pub async fn static_asset(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
) -> Result<Response> {
    let relative = Path::new(&path);

    // Anything but plain path segments (.., leading /, drive prefixes) is
    // refused before touching the filesystem.
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        tracing::warn!(path = %path, "blocked static path traversal");
        return Err(AppError::NotFound);
    }

    serve(
        state
            .config()
            .frontend
            .build_dir
            .join("static")
            .join(relative),
    )
    .await
}

/// Read a file from disk and wrap it with its guessed content type.
async fn serve(path: PathBuf) -> Result<Response> {
    let bytes = tokio::fs::read(&path).await.map_err(|_| AppError::NotFound)?;
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))?)
}
