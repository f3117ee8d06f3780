//! Records exchanged with the remote session store.

use super::message::HistoryEntry;
use super::status::{ExtractedData, ScamStatus};
use serde::{Deserialize, Serialize};

/// One row of the session index shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub is_scam: bool,
    /// In `[0, 1]`.
    pub confidence: f64,
}

impl SessionSummary {
    /// Sidebar caption under the title.
    pub fn status_caption(&self) -> &'static str {
        if self.is_scam {
            "Scam Detected"
        } else {
            "Analyzing..."
        }
    }
}

/// A full session as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub history: Vec<HistoryEntry>,
    pub is_scam: bool,
    pub confidence: f64,
    pub extracted: ExtractedData,
}

/// The service's answer to one sent message.
///
/// `session_id` is always set: the service assigns one when the request
/// carried none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReply {
    pub reply: String,
    pub session_id: String,
    pub scam_status: ScamStatus,
    pub confidence: f64,
    pub extracted: ExtractedData,
}
