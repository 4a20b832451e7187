//! Session lifecycle management.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::message::Message;
use super::model::{Session, SessionSummary};
use super::store::ConversationStore;
use crate::error::{Result, ScholiaError};

/// Mutable state owned by one session: its metadata, its conversation log,
/// and the pending-request flag that serializes submissions.
///
/// Each session keeps its own store and flag, so switching the active session
/// swaps the visible log rather than clearing a shared one, and an in-flight
/// dispatch can only ever touch the session it was issued under.
pub(crate) struct SessionState {
    pub(crate) session: Session,
    pub(crate) store: ConversationStore,
    pub(crate) pending: bool,
}

impl SessionState {
    fn new(session: Session) -> Self {
        Self {
            session,
            store: ConversationStore::new(),
            pending: false,
        }
    }
}

/// Manages multiple sessions and their lifecycle.
///
/// `SessionManager` is responsible for:
/// - Creating new sessions
/// - Switching between sessions
/// - Managing the active session
/// - Producing session summaries for the list UI
///
/// Sessions are held in memory only; they are destroyed on process exit.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionState>>>>,
    active: RwLock<Option<String>>,
}

impl SessionManager {
    /// Creates a new empty `SessionManager`.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            active: RwLock::new(None),
        }
    }

    /// Creates a new session with placeholder metadata and sets it as active.
    ///
    /// Returns the new session's id.
    pub async fn create_session(&self) -> String {
        self.insert_session(Session::new()).await
    }

    /// Creates a new titled session and sets it as active.
    pub async fn create_session_titled(&self, title: impl Into<String>) -> String {
        self.insert_session(Session::with_title(title)).await
    }

    async fn insert_session(&self, session: Session) -> String {
        let session_id = session.id.clone();

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), Arc::new(Mutex::new(SessionState::new(session))));
        drop(sessions);

        *self.active.write().await = Some(session_id.clone());
        tracing::debug!(session_id = %session_id, "session created");
        session_id
    }

    /// Switches the active session.
    ///
    /// The previous session keeps its own log and pending flag, so a
    /// still-in-flight request from it cannot reach the newly active log.
    ///
    /// # Errors
    ///
    /// Returns an error if the session doesn't exist.
    pub async fn switch_session(&self, session_id: &str) -> Result<()> {
        let sessions = self.sessions.read().await;
        if !sessions.contains_key(session_id) {
            return Err(ScholiaError::not_found("session", session_id));
        }
        drop(sessions);

        *self.active.write().await = Some(session_id.to_string());
        tracing::debug!(session_id, "switched active session");
        Ok(())
    }

    /// Returns the ID of the currently active session.
    pub async fn active_session_id(&self) -> Option<String> {
        self.active.read().await.clone()
    }

    /// Lists session summaries, most recently updated first.
    pub async fn list_summaries(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.read().await;
        let mut metas = Vec::with_capacity(sessions.len());
        for state in sessions.values() {
            metas.push(state.lock().await.session.clone());
        }
        drop(sessions);

        metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        metas.iter().map(Session::summary).collect()
    }

    /// Deletes a session, clearing the active id if it pointed at it.
    ///
    /// A response still in flight for the deleted session is dropped
    /// silently when it arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the session doesn't exist.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_id).is_none() {
            return Err(ScholiaError::not_found("session", session_id));
        }
        drop(sessions);

        let mut active = self.active.write().await;
        if active.as_deref() == Some(session_id) {
            *active = None;
        }
        Ok(())
    }

    /// Returns the session metadata.
    pub async fn session(&self, session_id: &str) -> Result<Session> {
        let entry = self.require_entry(session_id).await?;
        let state = entry.lock().await;
        Ok(state.session.clone())
    }

    /// Renames a session by updating its title.
    pub async fn rename_session(&self, session_id: &str, new_title: String) -> Result<()> {
        let entry = self.require_entry(session_id).await?;
        let mut state = entry.lock().await;
        state.session.title = new_title;
        state.session.touch();
        Ok(())
    }

    /// Returns the ordered message sequence of a session for rendering.
    pub async fn snapshot(&self, session_id: &str) -> Result<Vec<Message>> {
        let entry = self.require_entry(session_id).await?;
        let state = entry.lock().await;
        Ok(state.store.snapshot().to_vec())
    }

    /// True while a submission for this session awaits its response.
    pub async fn is_pending(&self, session_id: &str) -> Result<bool> {
        let entry = self.require_entry(session_id).await?;
        Ok(entry.lock().await.pending)
    }

    /// Empties a session's conversation log. Irreversible.
    pub async fn clear_conversation(&self, session_id: &str) -> Result<()> {
        let entry = self.require_entry(session_id).await?;
        let mut state = entry.lock().await;
        state.store.clear();
        state.session.touch();
        Ok(())
    }

    /// Looks up a session's state entry, if it still exists.
    pub(crate) async fn entry(&self, session_id: &str) -> Option<Arc<Mutex<SessionState>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    async fn require_entry(&self, session_id: &str) -> Result<Arc<Mutex<SessionState>>> {
        self.entry(session_id)
            .await
            .ok_or_else(|| ScholiaError::not_found("session", session_id))
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
