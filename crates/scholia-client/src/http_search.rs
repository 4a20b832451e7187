//! reqwest-based client for the textbook retrieval backend.
//!
//! One POST per query against `/api/search`; the response is classified into
//! a `SearchOutcome` by a pure function over status and body so the wire
//! contract is testable without a server. Non-2xx statuses and malformed
//! bodies are transport failures, never structured ones.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use scholia_core::search::{SearchBackend, SearchHit, SearchOutcome};
use scholia_core::{Result, ScholiaError};

use crate::config::ClientConfig;

/// HTTP client for the retrieval backend.
#[derive(Clone)]
pub struct HttpSearchClient {
    client: Client,
    base_url: String,
}

impl HttpSearchClient {
    /// Creates a client with the configured base URL and a bounded
    /// client-side timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScholiaError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Lists the subject collections available on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or responds with a
    /// non-2xx status or malformed body.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/collections", self.base_url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScholiaError::internal(format!("Collections request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(ScholiaError::internal(format!(
                "Collections request returned {}",
                response.status()
            )));
        }
        let body: CollectionsBody = response
            .json()
            .await
            .map_err(|e| ScholiaError::internal(format!("Malformed collections response: {e}")))?;
        Ok(body.collections)
    }

    /// Calls the backend health endpoint. False on any failure.
    pub async fn health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(%err, "health check failed");
                false
            }
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        let url = format!("{}/api/search", self.base_url);
        let request = SearchRequestBody { query };

        let response = match self.client.post(url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                return SearchOutcome::Unreachable {
                    detail: format!("search request failed: {err}"),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                return SearchOutcome::Unreachable {
                    detail: format!("failed to read response body: {err}"),
                };
            }
        };

        classify(status, &body)
    }
}

#[derive(Debug, Serialize)]
struct SearchRequestBody<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    success: bool,
    #[serde(default)]
    result: Option<ResultBody>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    collection: Option<String>,
    #[serde(default)]
    searched_collections: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    text: String,
    #[serde(default)]
    metadata: Option<MetadataBody>,
    #[serde(default)]
    distance: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    collection: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CollectionsBody {
    collections: Vec<String>,
}

/// Maps one HTTP response to a search outcome.
///
/// A 2xx body with `success: false` but no error string, or `success: true`
/// without a result, is malformed and therefore a transport failure.
fn classify(status: StatusCode, body: &str) -> SearchOutcome {
    if !status.is_success() {
        return SearchOutcome::Unreachable {
            detail: format!("backend returned {status}"),
        };
    }

    let parsed: SearchResponseBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            return SearchOutcome::Unreachable {
                detail: format!("malformed response body: {err}"),
            };
        }
    };

    if !parsed.success {
        return match parsed.error {
            Some(message) => SearchOutcome::NoMatch { message },
            None => SearchOutcome::Unreachable {
                detail: "failure response missing error message".to_string(),
            },
        };
    }

    let Some(result) = parsed.result else {
        return SearchOutcome::Unreachable {
            detail: "success response missing result".to_string(),
        };
    };

    let metadata = result.metadata.unwrap_or_default();
    SearchOutcome::Found(SearchHit {
        text: result.text,
        title: metadata.title,
        subject_collection: parsed.collection.or(metadata.collection),
        distance: result.distance,
        searched_collections: parsed.searched_collections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success_payload() {
        let body = r#"{
            "success": true,
            "result": {
                "text": "Ohm's Law states that V = IR.",
                "metadata": {"title": "Ohm's Law Fundamentals", "collection": "physics_textbook"},
                "distance": 0.12
            },
            "query": "What is Ohm's Law?",
            "collection": "physics_textbook",
            "searched_collections": ["physics_textbook", "chemistry_textbook", "biology_textbook"]
        }"#;

        let hit = match classify(StatusCode::OK, body) {
            SearchOutcome::Found(hit) => hit,
            other => panic!("expected Found, got {other:?}"),
        };
        assert_eq!(hit.text, "Ohm's Law states that V = IR.");
        assert_eq!(hit.title.as_deref(), Some("Ohm's Law Fundamentals"));
        assert_eq!(hit.subject_collection.as_deref(), Some("physics_textbook"));
        assert_eq!(hit.distance, Some(0.12));
        assert_eq!(hit.searched_collections.len(), 3);
    }

    #[test]
    fn test_classify_null_distance_is_carried_as_none() {
        let body = r#"{"success": true, "result": {"text": "passage", "distance": null}}"#;

        let SearchOutcome::Found(hit) = classify(StatusCode::OK, body) else {
            panic!("expected Found");
        };
        assert_eq!(hit.distance, None);
    }

    #[test]
    fn test_classify_structured_failure() {
        let body = r#"{"success": false, "error": "no match found"}"#;

        assert_eq!(
            classify(StatusCode::OK, body),
            SearchOutcome::NoMatch {
                message: "no match found".to_string()
            }
        );
    }

    #[test]
    fn test_classify_non_2xx_is_transport_failure() {
        let body = r#"{"success": false, "error": "No results found in any collection"}"#;

        let outcome = classify(StatusCode::NOT_FOUND, body);
        assert!(matches!(outcome, SearchOutcome::Unreachable { .. }));
    }

    #[test]
    fn test_classify_malformed_body_is_transport_failure() {
        assert!(matches!(
            classify(StatusCode::OK, "<html>gateway error</html>"),
            SearchOutcome::Unreachable { .. }
        ));
    }

    #[test]
    fn test_classify_success_without_result_is_transport_failure() {
        assert!(matches!(
            classify(StatusCode::OK, r#"{"success": true}"#),
            SearchOutcome::Unreachable { .. }
        ));
    }

    #[test]
    fn test_classify_failure_without_error_is_transport_failure() {
        assert!(matches!(
            classify(StatusCode::OK, r#"{"success": false}"#),
            SearchOutcome::Unreachable { .. }
        ));
    }
}
