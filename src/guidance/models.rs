//! Data models for the guidance flow

use crate::cameras::Coordinate;
use serde::{Deserialize, Serialize};

/// Answer text when the directory holds no cameras.
pub const NO_CAMERAS_TEXT: &str =
    "I'm sorry, there are no cameras available in your area.";

/// Answer text when the caller's coordinates or question are unusable.
pub const INVALID_REQUEST_TEXT: &str =
    "I'm sorry, I couldn't understand your request. Please try again.";

/// One validated inbound guidance call. Never persisted.
#[derive(Debug, Clone)]
pub struct GuidanceRequest {
    pub location: Coordinate,
    pub question_text: String,
}

impl GuidanceRequest {
    /// Validate raw caller inputs into a usable request: coordinates in
    /// range, question non-blank.
    pub fn new(latitude: f64, longitude: f64, question_text: &str) -> Result<Self, String> {
        let location = Coordinate::new(latitude, longitude)?;

        if question_text.trim().is_empty() {
            return Err("question_text must not be empty".to_string());
        }

        Ok(Self {
            location,
            question_text: question_text.to_string(),
        })
    }
}

/// The sole externally observable result of the guidance flow.
///
/// Every path populates it: success, no-camera, upstream failure,
/// timeout. `is_error` is always explicit so callers can branch on a
/// single boolean. Wire names follow the mobile app contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_name: Option<String>,

    #[serde(rename = "question")]
    pub question_text: String,

    #[serde(rename = "answer")]
    pub answer_text: String,

    #[serde(rename = "error")]
    pub is_error: bool,

    /// Diagnostic detail; never required to interpret the answer
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GuidanceResponse {
    pub fn success(
        camera_id: impl Into<String>,
        camera_name: impl Into<String>,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Self {
        Self {
            camera_id: Some(camera_id.into()),
            camera_name: Some(camera_name.into()),
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            is_error: false,
            detail: None,
        }
    }

    /// An error response with no camera fields populated.
    pub fn failure(
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            camera_id: None,
            camera_name: None,
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            is_error: true,
            detail: Some(detail.into()),
        }
    }
}
