//! Legacy single-call VLM backend
//!
//! Some providers accept a video URL inline with the prompt instead of
//! a separate asset upload. This backend is kept behind the same
//! [`VlmBackend`] seam as the canonical client.

use super::client::VlmBackend;
use super::config::VlmConfig;
use super::models::{VlmError, VlmOutcome};
use crate::error::GuideError;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::json;
use std::time::Duration;
use tracing::{error, warn};

const DIRECT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 500;

/// One-shot `video_url + prompt` client with bearer authorization.
pub struct DirectUrlClient {
    http: Client,
    config: VlmConfig,
}

impl DirectUrlClient {
    pub fn new(config: VlmConfig) -> Result<Self, GuideError> {
        let http = Client::builder()
            .timeout(DIRECT_TIMEOUT)
            .build()
            .map_err(|e| GuideError::Http(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl VlmBackend for DirectUrlClient {
    async fn analyze(&self, video_ref: &str, prompt: &str) -> VlmOutcome {
        let api_key = match &self.config.api_key {
            Some(key) if self.config.enabled => key.expose_secret().clone(),
            _ => {
                warn!("Direct VLM call skipped: integration disabled");
                METRICS.record_vlm_request("direct", "disabled");
                return VlmError::Disabled.into();
            }
        };

        let payload = json!({
            "video_url": video_ref,
            "prompt": prompt,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post(&self.config.base_url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&payload)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                error!("Direct VLM request timed out: {}", e);
                METRICS.record_vlm_request("direct", "timeout");
                return VlmError::Timeout(e.to_string()).into();
            }
            Err(e) => {
                error!("Failed to reach VLM endpoint: {}", e);
                METRICS.record_vlm_request("direct", "error");
                return VlmError::Transport(e.to_string()).into();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!("Direct VLM call returned status {}", status);
            METRICS.record_vlm_request("direct", "error");
            return VlmError::Upstream {
                status: status.as_u16(),
                message: format!("VLM API returned status code {}", status),
            }
            .into();
        }

        METRICS.record_vlm_request("direct", "success");

        match response.json::<serde_json::Value>().await {
            Ok(body) => match body.get("text").and_then(|t| t.as_str()) {
                Some(text) => VlmOutcome::answer(text),
                None => VlmOutcome::answer(body.to_string()),
            },
            Err(e) => VlmError::InvalidResponse(e.to_string()).into(),
        }
    }
}
