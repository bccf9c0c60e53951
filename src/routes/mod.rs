//! Route modules for Scrawl Server

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub mod frontend;
pub mod health;
pub mod upload;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_bytes = state.config().upload.max_bytes;

    Router::new()
        .route("/", get(frontend::index))
        .route("/favicon.ico", get(frontend::favicon))
        .route("/static/*path", get(frontend::static_asset))
        .route("/api/upload", post(upload::upload_file))
        .route("/api/upload-base64", post(upload::upload_base64))
        .route("/api/health", get(health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_bytes))
        .with_state(state)
}

/// Unrouted paths get the same envelope as every other error.
async fn not_found() -> AppError {
    AppError::NotFound
}
