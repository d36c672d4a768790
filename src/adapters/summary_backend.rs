//! Summary service client
//!
//! The backend answers a research question with a narrative summary, key
//! findings and a partial bibliography (`/query`), and with short facts to
//! show while the summary is being generated (`/facts`).

use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{FactsResponse, SummaryResponse};
use crate::utils::http::{get_json, FetchError};

/// Client for the summary backend
pub struct SummaryBackendClient {
    client: Client,
    base_url: String,
}

impl SummaryBackendClient {
    /// Create a new client with an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn question_url(&self, endpoint: &str, question: &str) -> String {
        format!(
            "{}/{}?question={}",
            self.base_url,
            endpoint,
            urlencoding::encode(question)
        )
    }

    /// Fetch the summary and bibliography for a question
    pub async fn fetch_summary(&self, question: &str) -> Result<SummaryResponse, FetchError> {
        let url = self.question_url("query", question);
        debug!("Summary request: {}", url);

        let response: SummaryResponse = get_json(&self.client, &url).await.map_err(|e| {
            warn!("Summary request failed for {:?}: {}", question, e);
            e
        })?;

        debug!(
            "Summary for {:?}: {} findings, {} works",
            question,
            response.summary.key_findings.len(),
            response.works_partial.len()
        );
        Ok(response)
    }

    /// Fetch facts related to a question
    pub async fn fetch_facts(&self, question: &str) -> Result<Vec<String>, FetchError> {
        let url = self.question_url("facts", question);
        debug!("Facts request: {}", url);

        let response: FactsResponse = get_json(&self.client, &url).await.map_err(|e| {
            warn!("Facts request failed for {:?}: {}", question, e);
            e
        })?;

        Ok(response.facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::{build_client, test_server};
    use std::time::Duration;

    fn client_for(base_url: &str) -> SummaryBackendClient {
        SummaryBackendClient::with_client(build_client(Duration::from_secs(5)).unwrap(), base_url)
    }

    #[test]
    fn test_question_url_is_encoded() {
        let client = client_for("https://backend.example.com/");

        assert_eq!(
            client.question_url("query", "¿qué es el ARN?"),
            "https://backend.example.com/query?question=%C2%BFqu%C3%A9%20es%20el%20ARN%3F"
        );
        assert_eq!(
            client.question_url("facts", "a&b"),
            "https://backend.example.com/facts?question=a%26b"
        );
    }

    #[tokio::test]
    async fn test_fetch_summary_error_status() {
        let url = test_server::serve_once(502, "<html>Bad Gateway</html>").await;
        let err = client_for(&url).fetch_summary("rna").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_fetch_facts() {
        let url = test_server::serve_once(200, r#"{"facts": ["uno", "dos"]}"#).await;
        let facts = client_for(&url).fetch_facts("rna").await.unwrap();
        assert_eq!(facts, vec!["uno".to_string(), "dos".to_string()]);
    }
}
