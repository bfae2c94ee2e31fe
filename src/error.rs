//! Application error types

use thiserror::Error;

/// Startup-time error surface.
///
/// Remote VLM failures never appear here: the client adapter converts
/// them into data before they reach the orchestrator.
#[derive(Debug, Error)]
pub enum GuideError {
    #[error("HTTP client error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;
