//! The active conversation held by the client.

use super::message::ChatMessage;
use super::model::{MessageReply, SessionRecord};
use super::status::{ExtractedData, ScamStatus};
use crate::display::{self, ConfidenceTier, Severity, StatusIcon};
use serde::{Deserialize, Serialize};

/// Local, transient state of the one conversation currently on screen.
///
/// `session_id == None` means the conversation has not been saved yet; the
/// service assigns an id with the first reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub scam_status: ScamStatus,
    pub confidence: f64,
    pub extracted: ExtractedData,
}

impl ConversationState {
    /// The state of a brand new, unsaved conversation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the full state of a loaded session. Local message ids are
    /// generated fresh.
    pub fn from_record(record: SessionRecord) -> Self {
        Self {
            session_id: Some(record.id),
            messages: record.history.into_iter().map(ChatMessage::from).collect(),
            scam_status: ScamStatus::from_is_scam(record.is_scam),
            confidence: record.confidence,
            extracted: record.extracted,
        }
    }

    pub fn is_session(&self, id: &str) -> bool {
        self.session_id.as_deref() == Some(id)
    }

    /// Appends the assistant reply and adopts every service-derived field.
    /// Returns the appended message.
    pub fn apply_reply(&mut self, reply: MessageReply) -> ChatMessage {
        let message = ChatMessage::assistant(reply.reply);
        self.messages.push(message.clone());
        self.session_id = Some(reply.session_id);
        self.scam_status = reply.scam_status;
        self.confidence = reply.confidence;
        self.extracted = reply.extracted;
        message
    }

    pub fn severity(&self) -> Severity {
        display::status_severity(self.scam_status, self.confidence)
    }

    pub fn status_icon(&self) -> StatusIcon {
        display::status_icon(self.scam_status, self.confidence, self.messages.len())
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        display::confidence_tier(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{HistoryEntry, MessageRole};

    #[test]
    fn test_from_record_replaces_everything() {
        let record = SessionRecord {
            id: "s1".to_string(),
            history: vec![HistoryEntry {
                role: MessageRole::User,
                content: "hi".to_string(),
            }],
            is_scam: true,
            confidence: 0.92,
            extracted: ExtractedData {
                upi: Some(vec!["x@upi".to_string()]),
                ..Default::default()
            },
        };

        let state = ConversationState::from_record(record);

        assert_eq!(state.session_id.as_deref(), Some("s1"));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, MessageRole::User);
        assert_eq!(state.messages[0].content, "hi");
        assert_eq!(state.scam_status, ScamStatus::ScamConfirmed);
        assert_eq!(state.confidence, 0.92);
        assert_eq!(state.extracted.upi, Some(vec!["x@upi".to_string()]));
    }

    #[test]
    fn test_apply_reply_adopts_session_id() {
        let mut state = ConversationState::empty();
        state.messages.push(ChatMessage::user("Hello"));

        let appended = state.apply_reply(MessageReply {
            reply: "who is this?".to_string(),
            session_id: "new-id".to_string(),
            scam_status: ScamStatus::Ongoing,
            confidence: 0.1,
            extracted: ExtractedData::default(),
        });

        assert!(state.is_session("new-id"));
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].role, MessageRole::Assistant);
        assert_eq!(state.messages[1].content, "who is this?");
        assert_eq!(state.messages[1], appended);
    }
}
