//! Numbered citations for the publications linked from a summary

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Finding, Publication, SummaryResponse};
use crate::utils::markdown::{extract_links, replace_links};

/// Bibliography entries in order of first citation
///
/// Each publication appears once; its 1-based position is its citation number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CitationList {
    entries: Vec<Publication>,
    #[serde(skip)]
    numbers: HashMap<String, usize>,
}

impl CitationList {
    /// Build the list from the linked markdown of a summary
    ///
    /// Links in `summary_text` come first, then the links of each finding in
    /// order. Links that do not match a bibliography id are dropped.
    pub fn build(
        summary_text: Option<&str>,
        findings: &[Finding],
        bibliography: &[Publication],
    ) -> Self {
        let mut list = Self::default();
        if bibliography.is_empty() {
            return list;
        }

        // First entry wins when the bibliography repeats an id
        let mut by_id: HashMap<&str, &Publication> = HashMap::with_capacity(bibliography.len());
        for publication in bibliography {
            by_id.entry(publication.id.as_str()).or_insert(publication);
        }

        let urls = summary_text
            .map(extract_links)
            .unwrap_or_default()
            .into_iter()
            .chain(findings.iter().flat_map(|f| extract_links(&f.summary)));

        let mut unresolved = 0usize;
        for url in urls {
            if list.numbers.contains_key(&url) {
                continue;
            }
            match by_id.get(url.as_str()) {
                Some(publication) => {
                    list.entries.push((*publication).clone());
                    list.numbers.insert(url, list.entries.len());
                }
                None => unresolved += 1,
            }
        }

        if unresolved > 0 {
            debug!("{} summary links did not match the bibliography", unresolved);
        }

        list
    }

    /// Build the list for a summary response: the direct answer first, then
    /// the key findings.
    pub fn from_response(response: &SummaryResponse) -> Self {
        Self::build(
            response.summary.query_answer.as_deref(),
            &response.summary.key_findings,
            &response.works_partial,
        )
    }

    /// Citation number of a publication id, if it was cited
    pub fn citation_number_of(&self, id: &str) -> Option<usize> {
        self.numbers.get(id).copied()
    }

    pub fn entries(&self) -> &[Publication] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Publication> {
        self.citation_number_of(id)
            .and_then(|n| self.entries.get(n - 1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace cited links with `label [n]`; other links are left as they are
    pub fn annotate(&self, markdown: &str) -> String {
        replace_links(markdown, |link| {
            self.citation_number_of(link.url)
                .map(|n| format!("{} [{}]", link.label, n))
        })
    }
}
