//! Retrieval backend trait definition.

use async_trait::async_trait;

use super::model::SearchOutcome;

/// Seam between the query dispatcher and the retrieval backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Executes one retrieval call for a trimmed, non-empty query.
    ///
    /// Infallible by construction: every failure mode maps to a
    /// [`SearchOutcome`] variant, so a dispatch cycle always produces a
    /// renderable outcome and the pending flag can always be cleared.
    async fn search(&self, query: &str) -> SearchOutcome;
}
