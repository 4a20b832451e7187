//! Search domain module.
//!
//! Contains the retrieval outcome model and the backend trait that seams
//! the dispatcher off from the HTTP client.

mod backend;
mod model;

pub use backend::SearchBackend;
pub use model::{SearchHit, SearchOutcome};
