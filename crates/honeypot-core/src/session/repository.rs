//! Remote session store trait.

use super::model::{MessageReply, SessionRecord, SessionSummary};
use crate::error::Result;
use async_trait::async_trait;

/// The remote store that owns every persisted session.
///
/// The client never writes sessions itself; it only asks the store to list,
/// load, extend (by sending a message) or delete them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lists every session summary in creation order (oldest first).
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Loads a full session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: Session found
    /// - `Ok(None)`: The store answered that the session does not exist
    /// - `Err(_)`: No usable answer was received
    async fn load_session(&self, session_id: &str) -> Result<Option<SessionRecord>>;

    /// Sends one user message.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The conversation to extend, or `None` to let the store create one
    /// * `message` - The message text
    async fn send_message(&self, session_id: Option<&str>, message: &str) -> Result<MessageReply>;

    /// Deletes a session. The response body carries nothing of interest.
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}
