//! Error types for the honeypot client.

use thiserror::Error;

/// A shared error type for the whole client.
///
/// Store implementations translate their transport-specific failures into
/// these variants so the synchronizer can reason about them without knowing
/// about HTTP.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoneypotError {
    /// The request never produced a response (unreachable host, reset, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape we expected.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl HoneypotError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the failure happened below the HTTP layer or while decoding,
    /// i.e. no usable answer was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode { .. }
        )
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HoneypotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HoneypotError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<toml::de::Error> for HoneypotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid TOML: {}", err))
    }
}

/// A type alias for `Result<T, HoneypotError>`.
pub type Result<T> = std::result::Result<T, HoneypotError>;
