//! Configuration for the VLM provider integration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// VLM provider client configuration.
///
/// Credentials are optional: without them the client degrades to a safe
/// errored outcome instead of attempting remote calls.
#[derive(Debug, Clone, Deserialize)]
pub struct VlmConfig {
    /// Enable/disable the remote integration globally
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Provider base URL (trailing `/api/v1` or `/` is stripped)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (env `VLM_API_KEY` if not set)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API secret (env `VLM_API_SECRET` if not set)
    #[serde(default)]
    pub api_secret: Option<SecretString>,

    /// Asset upload timeout in milliseconds
    #[serde(default = "default_upload_timeout_ms")]
    pub upload_timeout_ms: u64,

    /// Chat completion timeout in milliseconds
    #[serde(default = "default_chat_timeout_ms")]
    pub chat_timeout_ms: u64,

    /// Asset deletion timeout in milliseconds
    #[serde(default = "default_delete_timeout_ms")]
    pub delete_timeout_ms: u64,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    "https://api.mdi.milestonesys.com".to_string()
}
fn default_upload_timeout_ms() -> u64 {
    120_000
}
fn default_chat_timeout_ms() -> u64 {
    180_000
}
fn default_delete_timeout_ms() -> u64 {
    60_000
}

impl Default for VlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            upload_timeout_ms: default_upload_timeout_ms(),
            chat_timeout_ms: default_chat_timeout_ms(),
            delete_timeout_ms: default_delete_timeout_ms(),
        }
    }
}

impl VlmConfig {
    /// Load configuration from environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("VLM_ENABLED") {
            self.enabled = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("VLM_API_URL") {
            self.base_url = val;
        }

        if let Ok(val) = std::env::var("VLM_API_KEY") {
            self.api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("VLM_API_SECRET") {
            self.api_secret = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("VLM_UPLOAD_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.upload_timeout_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("VLM_CHAT_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.chat_timeout_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("VLM_DELETE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.delete_timeout_ms = ms;
            }
        }

        self
    }

    /// Base URL with any trailing `/api/v1` or `/` removed
    pub fn normalized_base(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        base.strip_suffix("/api/v1").unwrap_or(base).to_string()
    }

    /// Whether both halves of the credential pair are configured
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// `ApiKey <key>:<secret>` authorization header value
    pub fn auth_header(&self) -> Option<String> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(format!(
                "ApiKey {}:{}",
                key.expose_secret(),
                secret.expose_secret()
            )),
            _ => None,
        }
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_millis(self.chat_timeout_ms)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_millis(self.delete_timeout_ms)
    }
}
