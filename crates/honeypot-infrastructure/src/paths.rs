//! Path management for honeypot configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/honeypot/
//! └── config.toml              # Client configuration
//! ```

use honeypot_core::{HoneypotError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "honeypot";
const CONFIG_FILE: &str = "config.toml";

pub struct HoneypotPaths;

impl HoneypotPaths {
    /// Returns the configuration directory (`~/.config/honeypot/`).
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HoneypotError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join(APP_DIR))
    }

    /// Returns the path to the configuration file (`~/.config/honeypot/config.toml`).
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
