//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Transcript message types (`MessageRole`, `ChatMessage`, `HistoryEntry`)
//! - `status`: Remote classification results (`ScamStatus`, `ExtractedData`)
//! - `model`: Records exchanged with the remote store (`SessionSummary`, `SessionRecord`, `MessageReply`)
//! - `conversation`: The locally held active conversation (`ConversationState`)
//! - `repository`: The remote store seam (`SessionStore`)

mod conversation;
mod message;
mod model;
mod repository;
mod status;

// Re-export public API
pub use conversation::ConversationState;
pub use message::{ChatMessage, HistoryEntry, MessageRole};
pub use model::{MessageReply, SessionRecord, SessionSummary};
pub use repository::SessionStore;
pub use status::{ExtractedData, ScamStatus};
