//! Scrawl Server
//!
//! OCR relay service: accepts image uploads, forwards them to OCR.space, and
//! returns the extracted text. Also serves the prebuilt frontend.

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrawl_server::config::Config;
use scrawl_server::ocr::OcrSpaceProvider;
use scrawl_server::routes;
use scrawl_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrawl_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Scrawl Server v{}", env!("CARGO_PKG_VERSION"));
    if config.ocr.api_key.is_some() {
        tracing::info!("OCR.space API key configured");
    } else {
        tracing::warn!(
            "OCR_SPACE_API_KEY is not set; OCR requests will fail until it is configured"
        );
    }

    // Uploads are written here for the duration of each OCR call
    std::fs::create_dir_all(&config.upload.dir).expect("Failed to create upload directory");

    let provider = Arc::new(OcrSpaceProvider::new(&config.ocr));
    let state = AppState::new(config.clone(), provider);
    let app = routes::router(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Scrawl Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
