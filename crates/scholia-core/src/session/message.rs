//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles, retrieval provenance, and message content.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant (retrieval result or error text).
    Assistant,
}

/// Provenance of a retrieved passage. Present on assistant messages only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Title of the source passage (e.g., "Ohm's Law Fundamentals").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subject collection the passage came from (e.g., "physics_textbook").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_collection: Option<String>,
}

impl Provenance {
    /// True when neither field carries information.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subject_collection.is_none()
    }
}

/// A single message in a conversation history.
///
/// Messages are immutable once created; the conversation log is append-only
/// and insertion order is the only order ever displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned identifier, strictly increasing within a session.
    pub id: u64,
    /// The role of the message sender.
    pub role: MessageRole,
    /// Display text: the retrieved passage for assistant successes, a
    /// human-readable error string for error paths.
    pub content: String,
    /// Source of the retrieved passage (assistant successes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    /// Backend-reported dissimilarity; smaller is more relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_distance: Option<f64>,
    /// Subject collections that were queried, in backend order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_collections: Option<Vec<String>>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl Message {
    pub(crate) fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::User,
            content: content.into(),
            provenance: None,
            relevance_distance: None,
            searched_collections: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub(crate) fn assistant(id: u64, reply: AssistantReply) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content: reply.content,
            provenance: reply.provenance,
            relevance_distance: reply.relevance_distance,
            searched_collections: reply.searched_collections,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Displayed relevance score, computed as `1 - distance`.
    ///
    /// Deliberately not clamped: a distance outside `[0, 1]` produces a
    /// score outside `[0, 1]`.
    pub fn relevance_score(&self) -> Option<f64> {
        self.relevance_distance.map(|d| 1.0 - d)
    }
}

/// Payload for appending one assistant message to a conversation log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantReply {
    pub content: String,
    pub provenance: Option<Provenance>,
    pub relevance_distance: Option<f64>,
    pub searched_collections: Option<Vec<String>>,
}

impl AssistantReply {
    /// A plain-text reply with no retrieval metadata (error paths).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_score_is_one_minus_distance() {
        let mut message = Message::assistant(1, AssistantReply::text("passage"));
        message.relevance_distance = Some(0.342);

        assert_eq!(message.relevance_score(), Some(1.0 - 0.342));
    }

    #[test]
    fn test_relevance_score_is_not_clamped() {
        let mut message = Message::assistant(1, AssistantReply::text("passage"));

        message.relevance_distance = Some(1.7);
        assert_eq!(message.relevance_score(), Some(1.0 - 1.7));

        message.relevance_distance = Some(-0.2);
        assert_eq!(message.relevance_score(), Some(1.2));
    }

    #[test]
    fn test_user_message_carries_no_retrieval_metadata() {
        let message = Message::user(7, "What is Ohm's Law?");

        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.relevance_score(), None);
        assert!(message.provenance.is_none());
        assert!(message.searched_collections.is_none());
        assert!(!message.timestamp.is_empty());
    }
}
