//! Session synchronizer.
//!
//! `SessionSynchronizer` owns the active conversation and the session index
//! and is the only thing that mutates them. Each operation reconciles local
//! state with the remote [`SessionStore`]:
//!
//! - refresh: replace the index (newest first) on success, keep it on failure
//! - load: replace the whole conversation at once, or leave it untouched
//! - new conversation: reset locally, no request
//! - send: optimistic user message, then reply or a synthetic error reply
//! - delete: optimistic removal, reconciled by a refresh on failure
//!
//! No operation returns an error. Failures are logged and reported through
//! the outcome enums, and the state is always left in a previously valid shape.
//!
//! Every replacement of the active conversation bumps a generation counter.
//! Responses are tagged with the generation current at dispatch and are
//! discarded if the conversation has been replaced since.

use honeypot_core::HoneypotError;
use honeypot_core::session::{ChatMessage, ConversationState, SessionStore, SessionSummary};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Text of the assistant message appended when a send fails.
pub const CONNECTION_ERROR_REPLY: &str = "Connection error. Please try again.";

/// Width class of the surface rendering the state.
///
/// On a narrow viewport the session list collapses after a session is
/// opened or a new conversation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    pub fn from_width(width: u16, narrow_below: u16) -> Self {
        if width < narrow_below {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

#[derive(Debug)]
pub enum RefreshOutcome {
    /// The index was replaced; carries the new length.
    Refreshed(usize),
    /// The previous index was kept.
    Failed(HoneypotError),
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// The store answered that the session does not exist.
    NotFound,
    /// The conversation changed while the request was in flight.
    Stale,
    Failed(HoneypotError),
}

#[derive(Debug)]
pub enum SendOutcome {
    /// Carries the assistant message that was appended.
    Replied(ChatMessage),
    /// Carries the synthetic error reply that was appended.
    Failed(HoneypotError, ChatMessage),
    /// The conversation changed while the request was in flight; nothing was applied.
    Stale,
    /// Whitespace-only text; no request was made.
    Blank,
    /// Another reply is still pending; no request was made.
    Busy,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted {
        was_active: bool,
    },
    /// The delete failed and the index was re-fetched from the store.
    Reconciled {
        was_active: bool,
        error: HoneypotError,
    },
}

impl DeleteOutcome {
    pub fn was_active(&self) -> bool {
        match self {
            Self::Deleted { was_active } | Self::Reconciled { was_active, .. } => *was_active,
        }
    }
}

#[derive(Debug, Default)]
struct SyncState {
    conversation: ConversationState,
    sessions: Vec<SessionSummary>,
    pending_reply: bool,
    draft: String,
    sidebar_open: bool,
    viewport: Viewport,
    generation: u64,
    latest_load: u64,
}

impl SyncState {
    fn new() -> Self {
        Self {
            sidebar_open: true,
            ..Default::default()
        }
    }

    fn replace_conversation(&mut self, conversation: ConversationState) {
        self.conversation = conversation;
        self.generation += 1;
        if self.viewport == Viewport::Narrow {
            self.sidebar_open = false;
        }
    }

    fn reset_conversation(&mut self) {
        self.replace_conversation(ConversationState::empty());
        self.draft.clear();
    }
}

/// Clears the pending-reply flag when dropped, so a finished, failed or
/// cancelled send always releases the gate.
struct PendingReply<'a> {
    state: &'a Mutex<SyncState>,
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        lock(self.state).pending_reply = false;
    }
}

fn lock(state: &Mutex<SyncState>) -> MutexGuard<'_, SyncState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State container for the active conversation and the session index.
///
/// Cloning yields another handle to the same state, so a send can run on a
/// background task while the caller keeps rendering.
#[derive(Clone)]
pub struct SessionSynchronizer {
    store: Arc<dyn SessionStore>,
    state: Arc<Mutex<SyncState>>,
}

impl SessionSynchronizer {
    /// Creates a synchronizer with an empty conversation and an empty index.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(SyncState::new())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        lock(&self.state)
    }

    // ============================================================================
    // Snapshots
    // ============================================================================

    pub fn conversation(&self) -> ConversationState {
        self.state().conversation.clone()
    }

    /// The session index, newest first.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.state().sessions.clone()
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.state().conversation.session_id.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state().pending_reply
    }

    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state().draft = draft.into();
    }

    pub fn sidebar_open(&self) -> bool {
        self.state().sidebar_open
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.state().sidebar_open = open;
    }

    pub fn viewport(&self) -> Viewport {
        self.state().viewport
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state().viewport = viewport;
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Replaces the index with the store's list, newest first.
    ///
    /// On failure the previous index is kept. No retry.
    pub async fn refresh_sessions(&self) -> RefreshOutcome {
        match self.store.list_sessions().await {
            Ok(mut sessions) => {
                // The store lists in creation order.
                sessions.reverse();
                let count = sessions.len();
                self.state().sessions = sessions;
                tracing::debug!("[SessionSynchronizer] session list refreshed: {}", count);
                RefreshOutcome::Refreshed(count)
            }
            Err(e) => {
                tracing::warn!("[SessionSynchronizer] Failed to fetch sessions: {}", e);
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Loads a session and makes it the active conversation.
    ///
    /// The whole conversation is replaced in one step, so messages of two
    /// sessions never coexist. "Not found" and failures leave it untouched,
    /// and so does a response that arrives after a newer load or after the
    /// conversation was replaced.
    pub async fn load_session(&self, session_id: &str) -> LoadOutcome {
        let (generation, ticket) = {
            let mut state = self.state();
            state.latest_load += 1;
            (state.generation, state.latest_load)
        };

        tracing::debug!("[SessionSynchronizer] loading session {}", session_id);

        match self.store.load_session(session_id).await {
            Ok(Some(record)) => {
                let mut state = self.state();
                if state.generation != generation || state.latest_load != ticket {
                    tracing::warn!(
                        "[SessionSynchronizer] discarding stale load of session {}",
                        session_id
                    );
                    return LoadOutcome::Stale;
                }

                let conversation = ConversationState::from_record(record);
                tracing::info!(
                    "[SessionSynchronizer] loaded session {:?} ({} messages)",
                    conversation.session_id,
                    conversation.messages.len()
                );
                state.replace_conversation(conversation);
                LoadOutcome::Loaded
            }
            Ok(None) => {
                tracing::warn!("[SessionSynchronizer] session {} not found", session_id);
                LoadOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("[SessionSynchronizer] Failed to load session: {}", e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Resets to an empty, unsaved conversation and clears the draft.
    /// No request is made; calling it repeatedly yields the same state.
    pub fn start_new_conversation(&self) {
        self.state().reset_conversation();
        tracing::debug!("[SessionSynchronizer] started new conversation");
    }

    /// Sends one message in the active conversation.
    ///
    /// The user message is appended before the request is made and is never
    /// rolled back. On success the reply is appended and the service-derived
    /// fields (session id, status, confidence, artifacts) are adopted; on
    /// failure a synthetic assistant message with [`CONNECTION_ERROR_REPLY`]
    /// is appended and those fields are left as they were. A conversation
    /// that had no id gets one from the reply, and the index is refreshed so
    /// it shows up there.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Blank;
        }

        let (session_id, generation) = {
            let mut state = self.state();
            if state.pending_reply {
                tracing::debug!("[SessionSynchronizer] send rejected, reply pending");
                return SendOutcome::Busy;
            }
            state.conversation.messages.push(ChatMessage::user(text));
            state.draft.clear();
            state.pending_reply = true;
            (state.conversation.session_id.clone(), state.generation)
        };
        let pending = PendingReply { state: &self.state };

        tracing::debug!(
            "[SessionSynchronizer] sending message (session_id: {:?})",
            session_id
        );

        let result = self.store.send_message(session_id.as_deref(), text).await;
        let created_session = session_id.is_none() && result.is_ok();

        let outcome = {
            let mut state = self.state();
            if state.generation != generation {
                tracing::warn!(
                    "[SessionSynchronizer] discarding reply for replaced conversation {:?}",
                    session_id
                );
                SendOutcome::Stale
            } else {
                match result {
                    Ok(reply) => {
                        SendOutcome::Replied(state.conversation.apply_reply(reply))
                    }
                    Err(e) => {
                        tracing::warn!("[SessionSynchronizer] Failed to send message: {}", e);
                        let error_reply = ChatMessage::assistant(CONNECTION_ERROR_REPLY);
                        state.conversation.messages.push(error_reply.clone());
                        SendOutcome::Failed(e, error_reply)
                    }
                }
            }
        };
        drop(pending);

        // The service created a session even if we no longer display it.
        if created_session {
            self.refresh_sessions().await;
        }

        outcome
    }

    /// Deletes a session, removing it from the index before the request.
    ///
    /// Deleting the active session resets to a new conversation first. If
    /// the request fails, the index is re-fetched instead of re-inserting the
    /// removed row.
    pub async fn delete_session(&self, session_id: &str) -> DeleteOutcome {
        let was_active = {
            let mut state = self.state();
            state.sessions.retain(|s| s.id != session_id);
            let was_active = state.conversation.is_session(session_id);
            if was_active {
                state.reset_conversation();
            }
            was_active
        };

        tracing::debug!(
            "[SessionSynchronizer] deleting session {} (active: {})",
            session_id,
            was_active
        );

        match self.store.delete_session(session_id).await {
            Ok(()) => DeleteOutcome::Deleted { was_active },
            Err(e) => {
                tracing::warn!("[SessionSynchronizer] Failed to delete session: {}", e);
                self.refresh_sessions().await;
                DeleteOutcome::Reconciled {
                    was_active,
                    error: e,
                }
            }
        }
    }
}
