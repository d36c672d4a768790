//! Query orchestration
//!
//! A submitted query fans out to three independent fetches (summary, facts,
//! statistics). Results land in a single snapshot owned by the orchestrator.
//! Fetches are never cancelled; a response is committed only while the query
//! that issued it is still the current one.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::citation_mapper::CitationList;
use crate::adapters::ResearchBackend;
use crate::models::{AnalysisResult, Publication, Summary, SummaryResponse};
use crate::utils::http::FetchError;

/// Identity of one submission. Submitting the same text twice yields two
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey {
    pub query: String,
    pub id: Uuid,
}

impl QueryKey {
    pub(crate) fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            id: Uuid::new_v4(),
        }
    }
}

/// Failure messages per fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryErrors {
    pub summary: Option<String>,
    pub facts: Option<String>,
    pub stats: Option<String>,
}

impl QueryErrors {
    pub fn any(&self) -> bool {
        self.summary.is_some() || self.facts.is_some() || self.stats.is_some()
    }
}

/// Everything the rendering layer reads for the current query
#[derive(Debug, Clone, Default)]
pub struct QuerySnapshot {
    pub key: Option<QueryKey>,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Summary fetch in flight
    pub loading: bool,
    pub loading_facts: bool,
    pub loading_stats: bool,
    pub results: Option<SummaryResponse>,
    pub facts: Option<Vec<String>>,
    pub stats: Option<AnalysisResult>,
    pub citations: CitationList,
    pub total_publications_count: u64,
    pub errors: QueryErrors,
    /// Titles of the expanded key findings
    pub visible_findings: Vec<String>,
    pub open_publication: Option<Publication>,
}

impl QuerySnapshot {
    fn pending(key: QueryKey) -> Self {
        Self {
            key: Some(key),
            submitted_at: Some(Utc::now()),
            loading: true,
            loading_facts: true,
            loading_stats: true,
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        self.key.as_ref().map(|k| k.query.as_str()).unwrap_or("")
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.results.as_ref().map(|r| &r.summary)
    }

    pub fn is_finding_visible(&self, title: &str) -> bool {
        self.visible_findings.iter().any(|t| t == title)
    }

    /// True once all three fetches have completed or failed
    pub fn is_settled(&self) -> bool {
        !self.loading && !self.loading_facts && !self.loading_stats
    }

    fn find_publication(&self, id: &str) -> Option<&Publication> {
        self.citations.get(id).or_else(|| {
            self.results
                .as_ref()
                .and_then(|r| r.works_partial.iter().find(|p| p.id == id))
        })
    }
}

/// In-flight fetches of one submission
pub struct QueryHandle {
    key: QueryKey,
    tasks: Vec<JoinHandle<()>>,
}

impl QueryHandle {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Wait until every fetch of this submission has settled
    pub async fn wait(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                error!("Fetch task for {:?} aborted: {}", self.key.query, e);
            }
        }
    }
}

/// Owns the query state and issues the fetches for each submission
pub struct QueryOrchestrator {
    backend: Arc<dyn ResearchBackend>,
    state: Arc<watch::Sender<QuerySnapshot>>,
}

impl QueryOrchestrator {
    pub fn new(backend: Arc<dyn ResearchBackend>) -> Self {
        let (state, _) = watch::channel(QuerySnapshot::default());
        Self {
            backend,
            state: Arc::new(state),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> QuerySnapshot {
        self.state.borrow().clone()
    }

    /// Receive a notification on every state change
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.state.subscribe()
    }

    /// Submit a query
    ///
    /// Discards all state of the previous query and starts the summary, facts
    /// and statistics fetches. A blank query only clears the state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, query: &str) -> Option<QueryHandle> {
        let query = query.trim();
        if query.is_empty() {
            self.clear();
            return None;
        }

        let key = QueryKey::new(query);
        info!("Submitting query {:?} ({})", key.query, key.id);
        self.state.send_replace(QuerySnapshot::pending(key.clone()));

        let tasks = vec![
            self.spawn_fetch(
                key.clone(),
                "summary",
                |backend, query| async move { backend.fetch_summary(&query).await },
                |snapshot, result| {
                    snapshot.loading = false;
                    match result {
                        Ok(response) => {
                            snapshot.citations = CitationList::from_response(&response);
                            snapshot.total_publications_count = response.total_count;
                            snapshot.results = Some(response);
                        }
                        Err(e) => snapshot.errors.summary = Some(e.to_string()),
                    }
                },
            ),
            self.spawn_fetch(
                key.clone(),
                "facts",
                |backend, query| async move { backend.fetch_facts(&query).await },
                |snapshot, result| {
                    snapshot.loading_facts = false;
                    match result {
                        Ok(facts) => snapshot.facts = Some(facts),
                        Err(e) => snapshot.errors.facts = Some(e.to_string()),
                    }
                },
            ),
            self.spawn_fetch(
                key.clone(),
                "stats",
                |backend, query| async move { backend.fetch_stats(&query).await },
                |snapshot, result| {
                    snapshot.loading_stats = false;
                    match result {
                        Ok(stats) => snapshot.stats = Some(stats),
                        Err(e) => snapshot.errors.stats = Some(e.to_string()),
                    }
                },
            ),
        ];

        Some(QueryHandle { key, tasks })
    }

    /// Run one fetch and commit its result if `key` is still current
    fn spawn_fetch<T, F, Fut, A>(
        &self,
        key: QueryKey,
        what: &'static str,
        fetch: F,
        apply: A,
    ) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn ResearchBackend>, String) -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
        A: FnOnce(&mut QuerySnapshot, Result<T, FetchError>) + Send + 'static,
    {
        let request = fetch(Arc::clone(&self.backend), key.query.clone());
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let started = Instant::now();
            let result = request.await;
            match &result {
                Ok(_) => debug!(
                    "{} for {:?} finished in {:?}",
                    what,
                    key.query,
                    started.elapsed()
                ),
                Err(e) => match e.status() {
                    Some(code) => warn!("{} for {:?} rejected with HTTP {}", what, key.query, code),
                    None => warn!("{} for {:?} failed: {}", what, key.query, e),
                },
            }

            let committed = state.send_if_modified(|snapshot| {
                if snapshot.key.as_ref() != Some(&key) {
                    return false;
                }
                apply(snapshot, result);
                true
            });

            if !committed {
                debug!("Discarded stale {} response for {:?}", what, key.query);
            }
        })
    }

    /// Expand a collapsed finding or collapse an expanded one
    ///
    /// # Returns
    /// Whether the finding is visible afterwards
    pub fn toggle_finding(&self, title: &str) -> bool {
        let mut visible = false;
        self.state.send_modify(|snapshot| {
            if let Some(pos) = snapshot.visible_findings.iter().position(|t| t == title) {
                snapshot.visible_findings.remove(pos);
            } else {
                snapshot.visible_findings.push(title.to_string());
                visible = true;
            }
        });
        visible
    }

    /// Show the details of a publication from the current bibliography
    ///
    /// # Returns
    /// * `false` if the id is not part of the current results
    pub fn open_publication(&self, id: &str) -> bool {
        self.state.send_if_modified(|snapshot| {
            match snapshot.find_publication(id).cloned() {
                Some(publication) => {
                    snapshot.open_publication = Some(publication);
                    true
                }
                None => false,
            }
        })
    }

    pub fn close_publication(&self) {
        self.state.send_if_modified(|snapshot| snapshot.open_publication.take().is_some());
    }

    /// Drop all query state
    pub fn clear(&self) {
        debug!("Clearing query state");
        self.state.send_replace(QuerySnapshot::default());
    }
}
