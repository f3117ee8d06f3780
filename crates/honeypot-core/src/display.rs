//! Presentation tiers derived from conversation state.
//!
//! Each rule is an ordered chain: the first matching arm wins, and the order
//! of the arms is part of the contract.

use crate::session::ScamStatus;
use serde::Serialize;

/// Severity of the analysis panel's status card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// Icon next to the alert status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusIcon {
    Alert,
    Warning,
    /// Nothing has been said yet, so there is nothing to judge.
    Neutral,
    Safe,
}

impl StatusIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Alert => "[!!]",
            Self::Warning => "[!]",
            Self::Neutral => "[?]",
            Self::Safe => "[ok]",
        }
    }
}

/// Fill color tier of the confidence bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    Danger,
    Warning,
    Safe,
}

/// Confidence above which an unconfirmed conversation is flagged.
pub const SUSPICION_THRESHOLD: f64 = 0.5;

pub fn status_severity(status: ScamStatus, confidence: f64) -> Severity {
    match (status, confidence) {
        (ScamStatus::ScamConfirmed, _) => Severity::High,
        (_, c) if c > SUSPICION_THRESHOLD => Severity::Medium,
        _ => Severity::Low,
    }
}

pub fn status_icon(status: ScamStatus, confidence: f64, message_count: usize) -> StatusIcon {
    match (status, confidence, message_count) {
        (ScamStatus::ScamConfirmed, _, _) => StatusIcon::Alert,
        (_, c, _) if c > SUSPICION_THRESHOLD => StatusIcon::Warning,
        (_, _, 0) => StatusIcon::Neutral,
        _ => StatusIcon::Safe,
    }
}

pub fn confidence_tier(confidence: f64) -> ConfidenceTier {
    match confidence {
        c if c > 0.7 => ConfidenceTier::Danger,
        c if c > 0.3 => ConfidenceTier::Warning,
        _ => ConfidenceTier::Safe,
    }
}

/// Confidence as a percentage with one decimal, e.g. `92.0%`.
pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
