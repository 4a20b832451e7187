//! Search domain models.

use serde::{Deserialize, Serialize};

/// Best-matching passage returned by the retrieval backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The retrieved passage text
    pub text: String,

    /// Title of the source passage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Subject collection the passage was found in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_collection: Option<String>,

    /// Dissimilarity of the passage to the query; lower is more relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Subject collections that were queried, in backend order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searched_collections: Vec<String>,
}

/// Outcome of one retrieval call.
///
/// The three dispatch outcomes live in one tagged union so that every
/// completion path must handle all of them; transport failure is a variant
/// rather than an error type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The backend returned a best match.
    Found(SearchHit),
    /// The backend responded but reported a logical failure (no match,
    /// malformed query). `message` is backend-provided and user-facing.
    NoMatch { message: String },
    /// No well-formed backend response could be obtained (connectivity,
    /// timeout, non-2xx status, malformed body). `detail` is for logs only
    /// and is never shown to the user.
    Unreachable { detail: String },
}
