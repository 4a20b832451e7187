//! The query/response state machine.
//!
//! A submission runs exactly one cycle: validate, append the user message,
//! enter the pending state, await the backend, append exactly one assistant
//! message, and clear the pending state. The backend call is the only
//! suspension point; everything before it is synchronous so the user message
//! is visible immediately.

use std::sync::Arc;

use crate::error::{Result, ScholiaError};
use crate::search::{SearchBackend, SearchOutcome};
use crate::session::{AssistantReply, Provenance, SessionManager};

/// Fixed message appended when the backend cannot be reached.
///
/// Transport error detail goes to the log, never to the user.
pub const BACKEND_UNREACHABLE_MESSAGE: &str =
    "Unable to reach the search backend. Please check that the server is running and try again.";

/// Why a submission was rejected before any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The query was empty after trimming whitespace.
    EmptyQuery,
    /// A previous submission for this session is still awaiting its response.
    InFlight,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The cycle ran to completion and one assistant message was appended.
    Completed { session_id: String },
    /// The issuing session was deleted while the request was in flight;
    /// the response was dropped with no visible effect.
    Discarded { session_id: String },
    /// A guard failed; nothing was appended and no state changed.
    Rejected(RejectReason),
}

/// Orchestrates one request/response cycle per user-initiated submission.
///
/// The dispatcher holds no per-cycle state of its own: the conversation log
/// and the pending flag live on the session, and the issuing session id
/// travels with the cycle so completion never consults the currently active
/// session.
pub struct QueryDispatcher<B: SearchBackend> {
    backend: B,
    sessions: Arc<SessionManager>,
}

impl<B: SearchBackend> QueryDispatcher<B> {
    pub fn new(backend: B, sessions: Arc<SessionManager>) -> Self {
        Self { backend, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Runs one submission cycle for the given session.
    ///
    /// Guards: the trimmed input must be non-empty and the session must not
    /// already have a request in flight. A failed guard is a silent no-op
    /// reported as [`Submission::Rejected`], not an error.
    ///
    /// On guard pass the user message is appended before the first await
    /// point, so callers that spawn this future still observe it
    /// immediately. Exactly one assistant message is appended per accepted
    /// submission, whichever of the three outcomes occurs, and the pending
    /// flag always clears.
    ///
    /// # Errors
    ///
    /// Returns an error only for programmer misuse: submitting to a session
    /// id that does not exist at submission time.
    pub async fn submit(&self, session_id: &str, input: &str) -> Result<Submission> {
        let query = input.trim();
        if query.is_empty() {
            return Ok(Submission::Rejected(RejectReason::EmptyQuery));
        }

        let entry = self
            .sessions
            .entry(session_id)
            .await
            .ok_or_else(|| ScholiaError::not_found("session", session_id))?;

        {
            let mut state = entry.lock().await;
            if state.pending {
                tracing::debug!(session_id, "submission rejected: request already in flight");
                return Ok(Submission::Rejected(RejectReason::InFlight));
            }
            state.pending = true;
            state.store.append_user(query);
            state.session.record_query(query);
        }
        // Lock released before any network activity; the UI stays responsive.

        let issued_for = session_id.to_string();
        tracing::debug!(session_id = %issued_for, "dispatching query");
        let outcome = self.backend.search(query).await;

        // Completion resolves the session by the id captured at dispatch
        // start. The active session may have changed in the meantime; that
        // session's own log and flag are untouchable from here.
        match self.sessions.entry(&issued_for).await {
            Some(entry) => {
                let mut state = entry.lock().await;
                state.pending = false;
                state.store.append_assistant(reply_for(outcome));
                state.session.touch();
                Ok(Submission::Completed {
                    session_id: issued_for,
                })
            }
            None => {
                tracing::warn!(session_id = %issued_for, "dropping response for deleted session");
                Ok(Submission::Discarded {
                    session_id: issued_for,
                })
            }
        }
    }
}

/// Builds the single assistant message for a dispatch outcome.
fn reply_for(outcome: SearchOutcome) -> AssistantReply {
    match outcome {
        SearchOutcome::Found(hit) => {
            let provenance = Provenance {
                title: hit.title,
                subject_collection: hit.subject_collection,
            };
            AssistantReply {
                content: hit.text,
                provenance: (!provenance.is_empty()).then_some(provenance),
                relevance_distance: hit.distance,
                searched_collections: (!hit.searched_collections.is_empty())
                    .then_some(hit.searched_collections),
            }
        }
        SearchOutcome::NoMatch { message } => AssistantReply::text(format!("Error: {message}")),
        SearchOutcome::Unreachable { detail } => {
            tracing::warn!(%detail, "search backend unreachable");
            AssistantReply::text(BACKEND_UNREACHABLE_MESSAGE)
        }
    }
}
