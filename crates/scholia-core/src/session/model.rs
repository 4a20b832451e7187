//! Session domain model.
//!
//! This module contains the session metadata entity and the summary shape
//! consumed by the session list UI. Conversation content lives in
//! [`super::store::ConversationStore`]; sessions here carry only the light
//! identifying metadata shown in the sidebar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a freshly created session.
pub const NEW_SESSION_TITLE: &str = "New Session";

/// Preview placeholder shown before the first query of a session.
pub const NEW_SESSION_PREVIEW: &str = "Start a new search...";

const PREVIEW_MAX_CHARS: usize = 80;

/// Metadata for one conversation session.
///
/// Sessions are ephemeral in this snapshot: they live in memory and are
/// destroyed on process exit. Durable persistence is an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Truncated text of the most recent query, for the session list
    pub last_query_preview: String,
    /// Number of queries submitted in this session
    pub query_count: u32,
}

impl Session {
    /// Creates a new empty session with placeholder title and preview.
    pub fn new() -> Self {
        Self::with_title(NEW_SESSION_TITLE)
    }

    /// Creates a new empty session with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: now.clone(),
            updated_at: now,
            last_query_preview: NEW_SESSION_PREVIEW.to_string(),
            query_count: 0,
        }
    }

    /// Records an accepted query submission: bumps the count, refreshes the
    /// preview, and touches the update timestamp.
    pub(crate) fn record_query(&mut self, query: &str) {
        self.query_count += 1;
        self.last_query_preview = truncate_preview(query);
        self.touch();
    }

    /// Refreshes the update timestamp.
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Builds the summary shape consumed by the session list UI.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            last_query_preview: self.last_query_preview.clone(),
            timestamp_label: relative_label(&self.updated_at),
            query_count: self.query_count,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of the session list: identifying metadata plus a humanized
/// timestamp label ("Just now", "2 hours ago").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub last_query_preview: String,
    pub timestamp_label: String,
    pub query_count: u32,
}

fn truncate_preview(query: &str) -> String {
    if query.chars().count() <= PREVIEW_MAX_CHARS {
        return query.to_string();
    }
    let truncated: String = query.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{truncated}...")
}

/// Humanizes an RFC 3339 timestamp relative to now.
///
/// Unparseable timestamps are returned verbatim rather than failing the
/// session list render.
pub fn relative_label(timestamp: &str) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed = Utc::now().signed_duration_since(then.with_timezone(&Utc));

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return pluralized(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return pluralized(hours, "hour");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return pluralized(days, "day");
    }
    pluralized(days / 7, "week")
}

fn pluralized(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn timestamp_ago(elapsed: Duration) -> String {
        (Utc::now() - elapsed).to_rfc3339()
    }

    #[test]
    fn test_new_session_uses_placeholders() {
        let session = Session::new();

        assert_eq!(session.title, NEW_SESSION_TITLE);
        assert_eq!(session.last_query_preview, NEW_SESSION_PREVIEW);
        assert_eq!(session.query_count, 0);
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_record_query_updates_preview_and_count() {
        let mut session = Session::new();

        session.record_query("What is Ohm's Law?");

        assert_eq!(session.query_count, 1);
        assert_eq!(session.last_query_preview, "What is Ohm's Law?");
    }

    #[test]
    fn test_long_queries_are_truncated_in_preview() {
        let mut session = Session::new();
        let long_query = "x".repeat(200);

        session.record_query(&long_query);

        assert!(session.last_query_preview.ends_with("..."));
        assert!(session.last_query_preview.chars().count() <= PREVIEW_MAX_CHARS + 3);
    }

    #[test]
    fn test_relative_label_buckets() {
        assert_eq!(relative_label(&timestamp_ago(Duration::seconds(5))), "Just now");
        assert_eq!(
            relative_label(&timestamp_ago(Duration::minutes(3))),
            "3 minutes ago"
        );
        assert_eq!(
            relative_label(&timestamp_ago(Duration::hours(2))),
            "2 hours ago"
        );
        assert_eq!(relative_label(&timestamp_ago(Duration::days(1))), "1 day ago");
        assert_eq!(
            relative_label(&timestamp_ago(Duration::days(10))),
            "1 week ago"
        );
    }

    #[test]
    fn test_relative_label_passes_through_unparseable_input() {
        assert_eq!(relative_label("not a timestamp"), "not a timestamp");
    }
}
