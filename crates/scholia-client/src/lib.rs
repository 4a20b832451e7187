//! HTTP infrastructure for the Scholia retrieval backend.
//!
//! Provides the reqwest-based [`HttpSearchClient`] implementing the core
//! `SearchBackend` trait, and [`ClientConfig`] for locating the backend.

mod config;
mod http_search;

pub use config::{ClientConfig, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS};
pub use http_search::HttpSearchClient;
