//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/honeypot/config.toml`
//! (or an explicit path) and layers environment overrides on top.
//!
//! Precedence, lowest first: built-in defaults, config file, environment.
//! Command-line flags are applied by the binary after `load`.

use crate::paths::HoneypotPaths;
use honeypot_core::config::ClientConfig;
use honeypot_core::{HoneypotError, Result};
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "HONEYPOT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "HONEYPOT_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(HoneypotPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads file and process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads the config using `lookup` to read environment variables.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = self.read_file()?;
        apply_env_overrides(config, lookup)?.validated()
    }

    /// A missing file is not an error: defaults apply.
    fn read_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                self.path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            HoneypotError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!("[ConfigService] loaded {}", self.path.display());
        Ok(config)
    }
}

fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = base_url;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            HoneypotError::config(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw))
        })?;
        config.api.request_timeout_secs = Some(secs);
    }

    Ok(config)
}
