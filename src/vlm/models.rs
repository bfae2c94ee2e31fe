//! Data models for the VLM provider API

use serde::{Deserialize, Serialize};

/// Fallback answer when the chat completion times out.
pub const TIMEOUT_TEXT: &str =
    "I'm sorry, the video analysis took too long. Please try again with a shorter clip.";

/// Fallback answer for transport-level failures (DNS, refused connection).
pub const CONNECT_TEXT: &str =
    "I'm sorry, I'm having trouble connecting to the vision service. Please try again.";

/// Fallback answer for non-success upstream status codes.
pub const ANALYZE_FAILED_TEXT: &str =
    "I'm sorry, I couldn't analyze the video at this time. Please try again.";

/// VLM provider error types
#[derive(Debug, thiserror::Error)]
pub enum VlmError {
    #[error("VLM integration is disabled")]
    Disabled,

    #[error("could not read video asset: {0}")]
    Asset(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl VlmError {
    /// Safe, user-presentable answer text for this failure.
    pub fn user_text(&self) -> &'static str {
        match self {
            VlmError::Timeout(_) => TIMEOUT_TEXT,
            VlmError::Disabled | VlmError::Transport(_) => CONNECT_TEXT,
            _ => ANALYZE_FAILED_TEXT,
        }
    }
}

/// Normalized result of one VLM analysis.
///
/// `text` is always populated: on success with the model's answer, on
/// failure with a safe fallback sentence. Callers never synthesize error
/// text themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct VlmOutcome {
    pub text: String,
    pub errored: bool,
    pub detail: Option<String>,
}

impl VlmOutcome {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            errored: false,
            detail: None,
        }
    }

    pub fn failure(text: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            errored: true,
            detail: Some(detail.into()),
        }
    }
}

impl From<VlmError> for VlmOutcome {
    fn from(err: VlmError) -> Self {
        Self::failure(err.user_text(), err.to_string())
    }
}

/// Per-request analysis phase, used as a tracing/metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Uploading,
    Completing,
    Done,
    TimedOut,
    Failed,
    Cleanup,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Completing => "completing",
            Self::Done => "done",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
            Self::Cleanup => "cleanup",
        }
    }
}

/// One content part of a chat message: plain text or an asset reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    AssetId { asset_id: String },
}

/// A role/content entry in the `messages` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    pub fn user(text: impl Into<String>, asset_id: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text { text: text.into() },
                ContentPart::AssetId {
                    asset_id: asset_id.into(),
                },
            ],
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}
