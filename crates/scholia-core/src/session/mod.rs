//! Session domain module.
//!
//! This module contains all session-related domain models and management
//! logic for the in-memory conversation state.
//!
//! # Module Structure
//!
//! - `model`: Session metadata (`Session`, `SessionSummary`)
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `store`: Append-only conversation log (`ConversationStore`)
//! - `manager`: Session lifecycle and active-session tracking (`SessionManager`)

mod manager;
mod message;
mod model;
mod store;

// Re-export public API
pub use manager::SessionManager;
pub use message::{AssistantReply, Message, MessageRole, Provenance};
pub use model::{NEW_SESSION_PREVIEW, NEW_SESSION_TITLE, Session, SessionSummary};
pub use store::ConversationStore;
