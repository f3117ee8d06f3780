//! Wire DTOs for the honeypot HTTP API.
//!
//! The service is loose about optional fields (`extracted` may be `null`,
//! numbers may be missing on old rows), so every DTO accepts the loose form
//! and converts into the strict domain type.

use honeypot_core::session::{
    ExtractedData, HistoryEntry, MessageReply, ScamStatus, SessionRecord, SessionSummary,
};
use honeypot_core::{HoneypotError, Result};
use serde::{Deserialize, Serialize};

/// Body of `POST /honeypot/message`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    /// Serialized as `null` for a conversation that has no id yet.
    pub session_id: Option<&'a str>,
    pub message: &'a str,
}

/// One element of `GET /honeypot/sessions`.
#[derive(Debug, Deserialize)]
pub struct SessionSummaryDto {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_scam: Option<bool>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl From<SessionSummaryDto> for SessionSummary {
    fn from(dto: SessionSummaryDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.unwrap_or_else(|| "New Chat".to_string()),
            is_scam: dto.is_scam.unwrap_or(false),
            confidence: dto.confidence.unwrap_or(0.0),
        }
    }
}

/// Body of `GET /honeypot/session/{id}`: either a record or `{"error": ...}`.
#[derive(Debug, Deserialize)]
pub struct SessionLookupDto {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub is_scam: Option<bool>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub extracted: Option<ExtractedData>,
}

impl SessionLookupDto {
    /// `Ok(None)` when the service reported the session as missing.
    pub fn into_record(self) -> Result<Option<SessionRecord>> {
        if let Some(error) = self.error {
            tracing::debug!("[SessionLookupDto] service reported: {}", error);
            return Ok(None);
        }

        let id = self
            .id
            .ok_or_else(|| HoneypotError::decode("session response is missing 'id'"))?;
        let history = self
            .history
            .ok_or_else(|| HoneypotError::decode("session response is missing 'history'"))?;

        Ok(Some(SessionRecord {
            id,
            history,
            is_scam: self.is_scam.unwrap_or(false),
            confidence: self.confidence.unwrap_or(0.0),
            extracted: self.extracted.unwrap_or_default(),
        }))
    }
}

/// Body returned by `POST /honeypot/message`.
#[derive(Debug, Deserialize)]
pub struct MessageReplyDto {
    pub reply: String,
    pub session_id: String,
    #[serde(default)]
    pub scam_status: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub extracted: Option<ExtractedData>,
}

impl From<MessageReplyDto> for MessageReply {
    fn from(dto: MessageReplyDto) -> Self {
        Self {
            reply: dto.reply,
            session_id: dto.session_id,
            scam_status: dto
                .scam_status
                .as_deref()
                .map(ScamStatus::from_wire)
                .unwrap_or_default(),
            confidence: dto.confidence.unwrap_or(0.0),
            extracted: dto.extracted.unwrap_or_default(),
        }
    }
}
