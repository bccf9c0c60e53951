//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrProviderTrait;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    ocr: Arc<dyn OcrProviderTrait>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The OCR provider is injected rather than constructed here so tests can
    /// substitute a fake without network access.
    pub fn new(config: Config, ocr: Arc<dyn OcrProviderTrait>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, ocr }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the OCR provider
    pub fn ocr(&self) -> &Arc<dyn OcrProviderTrait> {
        &self.inner.ocr
    }
}
