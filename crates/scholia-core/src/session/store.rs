//! Append-only conversation log.

use super::message::{AssistantReply, Message};

/// Holds the ordered message sequence for one session.
///
/// The store owns message identity and timestamping: callers hand it content,
/// it hands back the inserted, immutable entry. Messages are never reordered
/// or mutated; `clear` is the only way to remove them.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message with the given content.
    ///
    /// Precondition: `content` is non-empty after trimming. The dispatcher
    /// rejects empty queries before they reach the store.
    pub fn append_user(&mut self, content: impl Into<String>) -> &Message {
        let id = self.allocate_id();
        self.messages.push(Message::user(id, content));
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    /// Appends one assistant message built from a dispatch outcome.
    pub fn append_assistant(&mut self, reply: AssistantReply) -> &Message {
        let id = self.allocate_id();
        self.messages.push(Message::assistant(id, reply));
        self.messages.last().unwrap()
    }

    /// Empties the log. Irreversible.
    ///
    /// The id counter is not reset, so ids never collide within a session
    /// even across clears.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns the current ordered message sequence as a read-only view.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::MessageRole;

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = ConversationStore::new();

        store.append_user("first");
        store.append_assistant(AssistantReply::text("second"));
        store.append_user("third");

        let contents: Vec<&str> = store
            .snapshot()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut store = ConversationStore::new();

        let a = store.append_user("one").id;
        let b = store.append_assistant(AssistantReply::text("two")).id;
        let c = store.append_user("three").id;

        assert!(a < b && b < c);
    }

    #[test]
    fn test_clear_empties_log_but_keeps_id_counter() {
        let mut store = ConversationStore::new();
        let before = store.append_user("query").id;

        store.clear();
        assert!(store.is_empty());

        let after = store.append_user("another").id;
        assert!(after > before);
    }

    #[test]
    fn test_roles_are_tagged_per_append() {
        let mut store = ConversationStore::new();
        store.append_user("q");
        store.append_assistant(AssistantReply::text("a"));

        assert_eq!(store.snapshot()[0].role, MessageRole::User);
        assert_eq!(store.snapshot()[1].role, MessageRole::Assistant);
    }
}
