//! External service adapters
//!
//! This module contains adapters for the remote services a query fans out to:
//! - Summary backend: narrative summary, key findings, bibliography and facts
//! - OpenAlex: works search used for publication statistics

pub mod openalex;
pub mod summary_backend;

pub use openalex::OpenAlexClient;
pub use summary_backend::SummaryBackendClient;

use async_trait::async_trait;
use std::time::Duration;

use crate::models::{AnalysisResult, AppSettings, SummaryResponse};
use crate::utils::http::{build_client, FetchError};

/// The three lookups issued for every query
#[async_trait]
pub trait ResearchBackend: Send + Sync {
    /// Summary, key findings and partial bibliography
    async fn fetch_summary(&self, query: &str) -> Result<SummaryResponse, FetchError>;

    /// Facts shown while the summary is loading
    async fn fetch_facts(&self, query: &str) -> Result<Vec<String>, FetchError>;

    /// Publication statistics for the query
    async fn fetch_stats(&self, query: &str) -> Result<AnalysisResult, FetchError>;
}

/// Backend talking to the real services over HTTP
pub struct HttpBackend {
    summary: SummaryBackendClient,
    works: OpenAlexClient,
}

impl HttpBackend {
    pub fn new(summary: SummaryBackendClient, works: OpenAlexClient) -> Self {
        Self { summary, works }
    }

    /// Build both clients from settings, sharing one connection pool
    pub fn from_settings(settings: &AppSettings) -> Result<Self, String> {
        let client = build_client(Duration::from_secs(settings.request_timeout_secs))?;

        let summary = SummaryBackendClient::with_client(client.clone(), &settings.summary_backend_url);
        let works = OpenAlexClient::with_client(client, &settings.openalex_url)
            .per_page(settings.works_per_page())
            .mailto(settings.openalex_mailto.clone());

        Ok(Self::new(summary, works))
    }
}

#[async_trait]
impl ResearchBackend for HttpBackend {
    async fn fetch_summary(&self, query: &str) -> Result<SummaryResponse, FetchError> {
        self.summary.fetch_summary(query).await
    }

    async fn fetch_facts(&self, query: &str) -> Result<Vec<String>, FetchError> {
        self.summary.fetch_facts(query).await
    }

    async fn fetch_stats(&self, query: &str) -> Result<AnalysisResult, FetchError> {
        self.works.fetch_stats(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_from_default_settings() {
        assert!(HttpBackend::from_settings(&AppSettings::default()).is_ok());
    }
}
