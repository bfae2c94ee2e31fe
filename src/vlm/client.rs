//! Canonical VLM backend: upload asset, chat completion, delete asset

use super::config::VlmConfig;
use super::models::*;
use crate::error::GuideError;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Prefix marking a video reference as an already-uploaded remote asset.
const REMOTE_ASSET_PREFIX: &str = "asset:";

/// Capability seam over VLM providers.
///
/// `analyze` owns the full asset lifecycle for one request and never
/// fails: every outcome, including upstream disasters, arrives as a
/// [`VlmOutcome`] with presentable text.
#[async_trait]
pub trait VlmBackend: Send + Sync {
    async fn analyze(&self, video_ref: &str, prompt: &str) -> VlmOutcome;
}

/// Client for the documented provider API (multipart asset upload, chat
/// completions with `asset_id` content parts, asset deletion).
pub struct AssetChatClient {
    http: Client,
    config: VlmConfig,
}

impl AssetChatClient {
    /// Create a new client. Timeouts are applied per request, not on the
    /// shared `Client`, since the three operations differ widely.
    pub fn new(config: VlmConfig) -> Result<Self, GuideError> {
        let http = Client::builder()
            .build()
            .map_err(|e| GuideError::Http(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn ready(&self) -> Result<String, VlmError> {
        if !self.config.enabled {
            return Err(VlmError::Disabled);
        }
        self.config.auth_header().ok_or(VlmError::Disabled)
    }

    /// Upload a video file to the provider's asset endpoint.
    ///
    /// Both 200 and 201 count as success. The asset identifier is read
    /// from either an `id` or `asset_id` field and normalized to one
    /// string. No failure escapes as a panic.
    pub async fn upload_asset(&self, video_path: &str) -> Result<String, VlmError> {
        let auth = self.ready()?;
        let start = Instant::now();

        let bytes = tokio::fs::read(video_path)
            .await
            .map_err(|e| VlmError::Asset(format!("{}: {}", video_path, e)))?;

        let file_name = Path::new(video_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip.mp4".to_string());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let url = format!("{}/api/v1/assets", self.config.normalized_base());

        debug!(video_path, "Uploading video asset");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .timeout(self.config.upload_timeout())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VlmError::Timeout(e.to_string())
                } else {
                    VlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VlmError::InvalidResponse(e.to_string()))?;

        let asset_id = body
            .get("asset_id")
            .or_else(|| body.get("id"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                VlmError::InvalidResponse("upload response carries no asset id".to_string())
            })?
            .to_string();

        METRICS.record_vlm_request("upload", "success");
        METRICS.observe_vlm_duration("upload", start.elapsed());

        debug!(asset_id = %asset_id, "Asset uploaded");
        Ok(asset_id)
    }

    /// Post a chat completion referencing an uploaded asset.
    ///
    /// Always returns an outcome; every failure branch carries a fixed,
    /// user-safe sentence as `text`.
    pub async fn chat_completion(
        &self,
        asset_id: &str,
        user_prompt: &str,
        system_prompt: Option<&str>,
    ) -> VlmOutcome {
        let auth = match self.ready() {
            Ok(auth) => auth,
            Err(e) => {
                warn!("VLM chat skipped: {}", e);
                METRICS.record_vlm_request("chat", "disabled");
                return e.into();
            }
        };

        let start = Instant::now();

        let mut messages = Vec::new();
        if let Some(system) = system_prompt {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(user_prompt, asset_id));

        let url = format!("{}/api/v1/chat/completions", self.config.normalized_base());

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&ChatRequest { messages })
            .timeout(self.config.chat_timeout())
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                error!("VLM chat request timed out: {}", e);
                METRICS.record_vlm_request("chat", "timeout");
                return VlmError::Timeout(format!(
                    "chat completion exceeded {} ms",
                    self.config.chat_timeout_ms
                ))
                .into();
            }
            Err(e) => {
                error!("Failed to reach VLM chat endpoint: {}", e);
                METRICS.record_vlm_request("chat", "error");
                return VlmError::Transport(e.to_string()).into();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("VLM chat returned status {}: {}", status, message);
            METRICS.record_vlm_request("chat", "error");
            return VlmError::Upstream {
                status: status.as_u16(),
                message,
            }
            .into();
        }

        // The per-request timeout also covers body read, so a stalled
        // upstream can surface here rather than at send().
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                error!("VLM chat response timed out mid-body: {}", e);
                METRICS.record_vlm_request("chat", "timeout");
                return VlmError::Timeout(format!(
                    "chat completion exceeded {} ms",
                    self.config.chat_timeout_ms
                ))
                .into();
            }
            Err(e) => {
                METRICS.record_vlm_request("chat", "error");
                return VlmError::InvalidResponse(e.to_string()).into();
            }
        };

        METRICS.record_vlm_request("chat", "success");
        METRICS.observe_vlm_duration("chat", start.elapsed());

        Self::extract_answer(&body)
    }

    /// Pull `choices[0].message.content` out of an OpenAI-style body.
    /// A body without the expected shape degrades to the raw text rather
    /// than failing: the upstream did answer, just not in the documented
    /// format.
    fn extract_answer(body: &str) -> VlmOutcome {
        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => return VlmOutcome::answer(body),
        };

        match value["choices"][0]["message"]["content"].as_str() {
            Some(content) => VlmOutcome::answer(content),
            None => {
                warn!("VLM response lacks choices[0].message.content, using raw body");
                VlmOutcome::answer(body)
            }
        }
    }

    /// Best-effort asset cleanup. 200 and 204 are success; any failure
    /// is logged and reported as `false`, never as an error.
    pub async fn delete_asset(&self, asset_id: &str) -> bool {
        let auth = match self.ready() {
            Ok(auth) => auth,
            Err(_) => return false,
        };

        let url = format!(
            "{}/api/v1/assets/{}",
            self.config.normalized_base(),
            asset_id
        );

        let result = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, auth)
            .timeout(self.config.delete_timeout())
            .send()
            .await;

        match result {
            Ok(response) => {
                let ok = response.status() == StatusCode::OK
                    || response.status() == StatusCode::NO_CONTENT;
                if !ok {
                    warn!(
                        asset_id,
                        status = %response.status(),
                        "Asset deletion rejected"
                    );
                }
                METRICS.record_vlm_request("delete", if ok { "success" } else { "error" });
                ok
            }
            Err(e) => {
                warn!(asset_id, "Failed to delete asset: {}", e);
                METRICS.record_vlm_request("delete", "error");
                false
            }
        }
    }
}

#[async_trait]
impl VlmBackend for AssetChatClient {
    async fn analyze(&self, video_ref: &str, prompt: &str) -> VlmOutcome {
        // References with the asset: prefix are already remote; anything
        // else is a local clip that must be uploaded first.
        let (asset_id, owned) = match video_ref.strip_prefix(REMOTE_ASSET_PREFIX) {
            Some(remote_id) => (remote_id.to_string(), false),
            None => {
                debug!(phase = AnalysisPhase::Uploading.as_str(), video_ref);
                match self.upload_asset(video_ref).await {
                    Ok(asset_id) => (asset_id, true),
                    Err(e) => {
                        error!(
                            phase = AnalysisPhase::Failed.as_str(),
                            "Asset upload failed: {}", e
                        );
                        METRICS.record_vlm_request("upload", "error");
                        return e.into();
                    }
                }
            }
        };

        debug!(phase = AnalysisPhase::Completing.as_str(), asset_id = %asset_id);
        let outcome = self.chat_completion(&asset_id, prompt, None).await;

        let terminal = if !outcome.errored {
            AnalysisPhase::Done
        } else if outcome.text == TIMEOUT_TEXT {
            AnalysisPhase::TimedOut
        } else {
            AnalysisPhase::Failed
        };
        debug!(phase = terminal.as_str(), errored = outcome.errored);

        // Cleanup never alters the outcome already computed.
        if owned {
            debug!(phase = AnalysisPhase::Cleanup.as_str(), asset_id = %asset_id);
            if !self.delete_asset(&asset_id).await {
                warn!(asset_id = %asset_id, "Best-effort asset cleanup failed");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_answer_openai_shape() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Turn left."}} ]}"#;
        let outcome = AssetChatClient::extract_answer(body);
        assert!(!outcome.errored);
        assert_eq!(outcome.text, "Turn left.");
    }

    #[test]
    fn test_extract_answer_degrades_to_raw_body() {
        let body = r#"{"result":"unexpected shape"}"#;
        let outcome = AssetChatClient::extract_answer(body);
        assert!(!outcome.errored);
        assert_eq!(outcome.text, body);
    }

    #[test]
    fn test_extract_answer_non_json_body() {
        let outcome = AssetChatClient::extract_answer("plain text answer");
        assert!(!outcome.errored);
        assert_eq!(outcome.text, "plain text answer");
    }

    #[tokio::test]
    async fn test_disabled_client_never_calls_network() {
        let mut config = VlmConfig::default();
        config.enabled = false;

        let client = AssetChatClient::new(config).unwrap();

        let outcome = client.chat_completion("asset-1", "prompt", None).await;
        assert!(outcome.errored);
        assert_eq!(outcome.text, CONNECT_TEXT);

        let upload = client.upload_asset("videos/any.mp4").await;
        assert!(matches!(upload, Err(VlmError::Disabled)));

        assert!(!client.delete_asset("asset-1").await);
    }

    #[tokio::test]
    async fn test_missing_credentials_degrade_gracefully() {
        // enabled but no key/secret configured
        let client = AssetChatClient::new(VlmConfig::default()).unwrap();

        let outcome = client.analyze("asset:abc", "prompt").await;
        assert!(outcome.errored);
        assert!(!outcome.text.is_empty());
    }
}
