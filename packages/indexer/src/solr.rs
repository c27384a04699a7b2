//! Solr publishing: atomic field update followed by a soft commit.
//!
//! The two requests are independent. Neither response status is checked
//! beyond a warning, and the commit is always sent once the update request
//! has completed.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::config::{soft_commit_url, update_url, validate_solr_url, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{IndexerError, Result};

/// `{"set": value}` modifier of an atomic update.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SetField<'a> {
    pub set: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UpdateDoc<'a> {
    pub id: &'a str,
    pub transcription: SetField<'a>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AddCommand<'a> {
    pub doc: UpdateDoc<'a>,
}

/// Body posted to the update handler.
///
/// # Examples
/// ```
/// use usep_indexer::solr::UpdateEnvelope;
///
/// let envelope = UpdateEnvelope::set_transcription("CA.Berk.UC.HMA.G.8/4213", "<p/>");
/// assert_eq!(
///     serde_json::to_string(&envelope).unwrap(),
///     r#"{"add":{"doc":{"id":"CA.Berk.UC.HMA.G.8/4213","transcription":{"set":"<p/>"}}}}"#
/// );
/// ```
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UpdateEnvelope<'a> {
    pub add: AddCommand<'a>,
}

impl<'a> UpdateEnvelope<'a> {
    pub fn set_transcription(id: &'a str, transcription: &'a str) -> Self {
        Self {
            add: AddCommand {
                doc: UpdateDoc {
                    id,
                    transcription: SetField { set: transcription },
                },
            },
        }
    }
}

/// Blocking client bound to one Solr core.
#[derive(Debug, Clone)]
pub struct SolrClient {
    client: Client,
    base_url: String,
}

impl SolrClient {
    /// Validate `solr_url` and build the HTTP client.
    pub fn new(solr_url: &str) -> Result<Self> {
        let base_url = validate_solr_url(solr_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the atomic update for one document.
    pub fn post_update(&self, envelope: &UpdateEnvelope<'_>) -> Result<()> {
        let url = update_url(&self.base_url);
        let body = serde_json::to_string(envelope)?;
        tracing::debug!(url = %url, bytes = body.len(), "Posting Solr update");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|source| IndexerError::SolrRequest {
                operation: "update",
                url: url.clone(),
                source,
            })?;
        log_status("update", &url, &response);
        Ok(())
    }

    /// GET the soft-commit URL so pending updates become visible.
    pub fn soft_commit(&self) -> Result<()> {
        let url = soft_commit_url(&self.base_url);
        tracing::debug!(url = %url, "Requesting Solr soft commit");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| IndexerError::SolrRequest {
                operation: "soft commit",
                url: url.clone(),
                source,
            })?;
        log_status("soft commit", &url, &response);
        Ok(())
    }
}

fn log_status(operation: &str, url: &str, response: &Response) {
    let status = response.status();
    if status.is_success() {
        tracing::debug!(operation, status = %status, "Solr request completed");
    } else {
        tracing::warn!(operation, url, status = %status, "Solr returned a non-success status");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_shape() {
        let envelope = UpdateEnvelope::set_transcription("id-1", "text with \"quotes\"");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "add": {"doc": {"id": "id-1", "transcription": {"set": "text with \"quotes\""}}}
            })
        );
    }

    #[test]
    fn test_envelope_empty_transcription() {
        let envelope = UpdateEnvelope::set_transcription("id-2", "");
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"add":{"doc":{"id":"id-2","transcription":{"set":""}}}}"#
        );
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = SolrClient::new("http://localhost:8983/solr/usep/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8983/solr/usep");
    }

    #[test]
    fn test_soft_commit_transport_error_names_operation() {
        let client = SolrClient::new("http://127.0.0.1:1/solr/usep").unwrap();
        match client.soft_commit().unwrap_err() {
            IndexerError::SolrRequest { operation, url, .. } => {
                assert_eq!(operation, "soft commit");
                assert_eq!(url, "http://127.0.0.1:1/solr/usep/update?softCommit=true");
            }
            other => panic!("expected SolrRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let result = SolrClient::new("solr/usep");
        assert!(matches!(result, Err(IndexerError::InvalidSolrUrl { .. })));
    }
}
