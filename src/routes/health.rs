//! Health check endpoint
//!
//! Reports whether the OCR provider credential is configured. This is a
//! liveness/config check, not a reachability probe of the provider.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_key_configured: bool,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.config().ocr.api_key.is_some() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                api_key_configured: true,
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "unhealthy",
                api_key_configured: false,
            }),
        )
    }
}
