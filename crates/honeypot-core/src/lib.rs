//! Domain model for the honeypot chat client.
//!
//! The remote honeypot service owns classification, extraction and
//! persistence. This crate only describes what the client holds locally and
//! the seam ([`session::SessionStore`]) through which it talks to the service.

pub mod config;
pub mod display;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{HoneypotError, Result};
