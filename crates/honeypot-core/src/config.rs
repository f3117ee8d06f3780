//! Client configuration model.
//!
//! Loading and override precedence live in the infrastructure crate; this
//! module only defines the shape and its validation.

use crate::error::{HoneypotError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://ai-scam-honeypot-6o4l.onrender.com";

/// Terminal width (columns) below which the client behaves as on a narrow viewport.
pub const DEFAULT_NARROW_WIDTH: u16 = 100;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the honeypot HTTP API, without trailing slash.
    pub base_url: String,
    /// Per-request timeout. `None` leaves it to the transport.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub narrow_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            narrow_width: DEFAULT_NARROW_WIDTH,
        }
    }
}

impl ClientConfig {
    /// Trims trailing slashes and checks the base URL scheme.
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.api.base_url.trim().trim_end_matches('/').to_string();

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(HoneypotError::config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(HoneypotError::config(
                "request_timeout_secs must be greater than zero",
            ));
        }

        self.api.base_url = trimmed;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.ui.narrow_width, DEFAULT_NARROW_WIDTH);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str("[api]\nrequest_timeout_secs = 20\n").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.request_timeout_secs, Some(20));
    }

    #[test]
    fn test_validated_trims_trailing_slash() {
        let mut config = ClientConfig::default();
        config.api.base_url = "http://localhost:8000/".to_string();
        let config = config.validated().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_validated_rejects_bad_scheme() {
        let mut config = ClientConfig::default();
        config.api.base_url = "localhost:8000".to_string();
        assert!(config.validated().unwrap_err().is_config());
    }
}
