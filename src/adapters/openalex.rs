//! OpenAlex works client
//!
//! Fetches one fixed-size page of works for a search and turns it into
//! publication statistics.
//! See: https://docs.openalex.org/api-entities/works

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::models::{AnalysisResult, WorksResponse, MAX_WORKS_PER_PAGE};
use crate::services::publication_aggregator::analyze;
use crate::utils::http::{get_json, rate_limiters, FetchError};

/// Fields needed for statistics
const WORKS_SELECT: &str = "doi,authorships,title,publication_date";

/// Client for the OpenAlex works endpoint
pub struct OpenAlexClient {
    client: Client,
    base_url: String,
    per_page: u32,
    mailto: Option<String>,
}

impl OpenAlexClient {
    /// Create a new client with an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page: MAX_WORKS_PER_PAGE,
            mailto: None,
        }
    }

    /// Set the page size, capped at the OpenAlex maximum of 200
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_WORKS_PER_PAGE);
        self
    }

    /// Identify requests with a contact address (OpenAlex polite pool)
    pub fn mailto(mut self, mailto: Option<String>) -> Self {
        self.mailto = mailto.filter(|m| !m.trim().is_empty());
        self
    }

    fn works_url(&self, search: &str) -> String {
        let mut url = format!(
            "{}/works?search={}&per_page={}&select={}",
            self.base_url,
            urlencoding::encode(search),
            self.per_page,
            WORKS_SELECT
        );
        if let Some(ref mailto) = self.mailto {
            url.push_str("&mailto=");
            url.push_str(&urlencoding::encode(mailto));
        }
        url
    }

    /// Fetch the first page of works matching a search
    pub async fn fetch_works(&self, search: &str) -> Result<WorksResponse, FetchError> {
        rate_limiters::OPENALEX.wait_for_slot("openalex").await;

        let url = self.works_url(search);
        debug!("OpenAlex works request: {}", url);

        let response: WorksResponse = get_json(&self.client, &url).await.map_err(|e| {
            warn!("OpenAlex works request failed for {:?}: {}", search, e);
            e
        })?;

        debug!(
            "OpenAlex returned {} works (total {:?})",
            response.results.len(),
            response.meta.as_ref().and_then(|m| m.count)
        );
        Ok(response)
    }

    /// Fetch works for a search and compute their statistics
    ///
    /// Analysis only runs on a successful fetch.
    pub async fn fetch_stats(&self, search: &str) -> Result<AnalysisResult, FetchError> {
        let works = self.fetch_works(search).await?;
        let stats = analyze(&works.results);
        info!(
            "Computed statistics for {:?} over {} works",
            search,
            works.results.len()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_OPENALEX_URL;
    use crate::utils::http::{build_client, test_server};
    use std::time::Duration;

    fn client_for(base_url: &str) -> OpenAlexClient {
        OpenAlexClient::with_client(build_client(Duration::from_secs(5)).unwrap(), base_url)
    }

    #[test]
    fn test_works_url() {
        let client = client_for(DEFAULT_OPENALEX_URL);
        assert_eq!(
            client.works_url("cambio climático"),
            "https://api.openalex.org/works?search=cambio%20clim%C3%A1tico&per_page=200&select=doi,authorships,title,publication_date"
        );
    }

    #[test]
    fn test_works_url_with_options() {
        let client = OpenAlexClient::with_client(Client::new(), "http://localhost:8080/")
            .per_page(1000)
            .mailto(Some("lab@example.org".to_string()));

        assert_eq!(
            client.works_url("rna"),
            "http://localhost:8080/works?search=rna&per_page=200&select=doi,authorships,title,publication_date&mailto=lab%40example.org"
        );
    }

    #[test]
    fn test_blank_mailto_is_ignored() {
        let client = OpenAlexClient::with_client(Client::new(), DEFAULT_OPENALEX_URL)
            .per_page(0)
            .mailto(Some("  ".to_string()));
        assert!(!client.works_url("x").contains("mailto"));
        assert!(client.works_url("x").contains("per_page=1&"));
    }

    #[tokio::test]
    async fn test_fetch_stats_error_status() {
        let url = test_server::serve_once(503, r#"{"error": "unavailable"}"#).await;
        let result = client_for(&url).fetch_stats("rna").await;
        assert_eq!(result.unwrap_err(), FetchError::HttpStatus(503));
    }

    #[tokio::test]
    async fn test_fetch_stats_malformed_body() {
        let url = test_server::serve_once(200, r#"{"results": "nope"}"#).await;
        let result = client_for(&url).fetch_stats("rna").await;
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_stats_analyzes_page() {
        let body = r#"{
            "meta": {"count": 1},
            "results": [{
                "doi": null,
                "title": "Work",
                "publication_date": "2020-02-03",
                "authorships": [{
                    "author": {"id": "https://openalex.org/A1", "display_name": "Ana"},
                    "institutions": [],
                    "countries": ["CL"]
                }]
            }]
        }"#;
        let url = test_server::serve_once(200, body).await;

        let stats = client_for(&url).fetch_stats("rna").await.unwrap();
        assert_eq!(stats.year_distribution["2020"], 1);
        assert_eq!(stats.country_distribution["CL"], 1);
        assert_eq!(stats.top_authors[0].display_name, "Ana");
    }
}
