//! OCR Module
//!
//! Client for the hosted OCR.space recognition API. The provider sits behind
//! a capability trait so handlers (and tests) never depend on the concrete
//! backend.
//!
//! Failure taxonomy:
//! - configuration: the API key is not set (`OcrError::ApiKeyMissing`)
//! - transport: timeout, connection failure, non-2xx (`OcrError::Request`)
//! - provider-reported: the parse response carries an error flag
//!   (`OcrError::Provider`, message verbatim)
//! - empty result: the call succeeded but no text came back (`OcrError::NoText`)

mod provider;
mod types;

pub use provider::{OcrProviderTrait, OcrSpaceProvider};
pub use types::{
    ErrorMessage, ImageSource, OcrError, ParseResponse, ParsedResult, Recognition, TextOverlay,
};

#[cfg(test)]
pub(crate) use provider::{MockOutcome, MockProvider};
