//! Service-level configuration

use serde::{Deserialize, Serialize};

/// Application configuration for the guidance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Path to the camera registry file
    #[serde(default = "default_cameras_file")]
    pub cameras_file: String,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_cameras_file() -> String {
    "cameras.json".to_string()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cameras_file: default_cameras_file(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("PORT") {
            if let Ok(port) = val.parse() {
                self.port = port;
            }
        }

        if let Ok(val) = std::env::var("HOST") {
            self.host = val;
        }

        if let Ok(val) = std::env::var("CAMERAS_FILE") {
            self.cameras_file = val;
        }

        if let Ok(val) = std::env::var("MAX_BODY_BYTES") {
            if let Ok(bytes) = val.parse() {
                self.max_body_bytes = bytes;
            }
        }

        self
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.cameras_file, "cameras.json");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("PORT", "8080");
        std::env::set_var("CAMERAS_FILE", "/etc/guide/cameras.json");

        let config = AppConfig::default().from_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cameras_file, "/etc/guide/cameras.json");

        // Cleanup
        std::env::remove_var("PORT");
        std::env::remove_var("CAMERAS_FILE");
    }
}
