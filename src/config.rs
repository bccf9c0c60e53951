//! Configuration management for Scrawl Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default OCR.space parse endpoint.
pub const DEFAULT_OCR_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// Default maximum request body size (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Fixed timeout for outbound OCR requests.
const OCR_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// OCR.space API key. Absence never fails startup; it is surfaced through
    /// the health endpoint and fails individual OCR calls instead.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory uploads are briefly persisted to before OCR.
    pub dir: PathBuf,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Prebuilt frontend directory holding index.html, favicon.ico and static/.
    pub build_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            ocr: OcrConfig {
                api_key: None,
                endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
                timeout: Duration::from_secs(OCR_TIMEOUT_SECS),
            },
            upload: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            frontend: FrontendConfig {
                build_dir: PathBuf::from("frontend/build"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
            },
            ocr: OcrConfig {
                // An empty value counts as unset, same as a missing variable.
                api_key: env::var("OCR_SPACE_API_KEY").ok().filter(|k| !k.is_empty()),
                endpoint: env::var("OCR_SPACE_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_OCR_ENDPOINT.to_string()),
                timeout: Duration::from_secs(OCR_TIMEOUT_SECS),
            },
            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .unwrap_or_else(|_| "uploads".to_string())
                    .into(),
                max_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
            frontend: FrontendConfig {
                build_dir: env::var("FRONTEND_BUILD_DIR")
                    .unwrap_or_else(|_| "frontend/build".to_string())
                    .into(),
            },
        }
    }
}
