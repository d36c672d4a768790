//! Result views built from the orchestrator snapshot

use serde::Serialize;
use std::cmp::Reverse;

use crate::models::{AnalysisResult, AuthorCount, InstitutionCount, Publication};
use crate::services::QuerySnapshot;
use crate::utils::authors::{format_byline, format_byline_with_year};
use crate::utils::typography::prevent_widows;

/// Rows shown per statistics table
pub const STATS_TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ResultsStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryHeader {
    pub total_publications: u64,
    pub heading: String,
    /// Narrative with numbered citation markers
    pub body: String,
    pub related_queries: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindingView {
    pub key: String,
    pub title: String,
    pub summary: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BibliographyEntry {
    pub number: usize,
    pub id: String,
    pub title: String,
    pub byline: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub top_authors: Vec<CountRow>,
    pub top_institutions: Vec<CountRow>,
    pub top_countries: Vec<CountRow>,
    /// Oldest year first
    pub years: Vec<CountRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub query: String,
    pub status: ResultsStatus,
    pub header: Option<SummaryHeader>,
    pub findings: Vec<FindingView>,
    pub bibliography: Vec<BibliographyEntry>,
    pub stats: Option<StatsView>,
    pub facts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicationDetails {
    pub title: String,
    pub byline: String,
    pub cited_by_count: u64,
    pub source_url: Option<String>,
    pub venue: Option<String>,
}

fn status_of(snapshot: &QuerySnapshot) -> ResultsStatus {
    if snapshot.key.is_none() {
        ResultsStatus::Idle
    } else if snapshot.loading {
        ResultsStatus::Loading
    } else if let Some(ref error) = snapshot.errors.summary {
        ResultsStatus::Failed(error.clone())
    } else {
        ResultsStatus::Ready
    }
}

/// Build the results page for the current snapshot
pub fn get_results(snapshot: &QuerySnapshot) -> ResultsView {
    let citations = &snapshot.citations;

    let (header, findings) = match snapshot.summary() {
        Some(summary) => {
            let header = SummaryHeader {
                total_publications: snapshot.total_publications_count,
                heading: prevent_widows(summary.heading()),
                body: citations.annotate(summary.body()),
                related_queries: summary.related_queries.clone(),
            };

            let findings = summary
                .key_findings
                .iter()
                .map(|finding| FindingView {
                    key: finding.title.clone(),
                    title: prevent_widows(&finding.title),
                    summary: citations.annotate(&finding.summary),
                    expanded: snapshot.is_finding_visible(&finding.title),
                })
                .collect();

            (Some(header), findings)
        }
        None => (None, Vec::new()),
    };

    let bibliography = citations
        .entries()
        .iter()
        .enumerate()
        .map(|(i, publication)| bibliography_entry(i + 1, publication))
        .collect();

    ResultsView {
        query: snapshot.query().to_string(),
        status: status_of(snapshot),
        header,
        findings,
        bibliography,
        stats: snapshot
            .stats
            .as_ref()
            .filter(|stats| !stats.is_empty())
            .map(stats_view),
        facts: snapshot.facts.clone().unwrap_or_default(),
    }
}

fn bibliography_entry(number: usize, publication: &Publication) -> BibliographyEntry {
    let mut byline = format_byline(publication);
    if let Some(year) = publication.pub_year {
        byline = format!("{}, ({})", byline, year);
    }

    BibliographyEntry {
        number,
        id: publication.id.clone(),
        title: publication.title.clone(),
        byline,
    }
}

fn author_rows(authors: &[AuthorCount]) -> Vec<CountRow> {
    authors
        .iter()
        .take(STATS_TOP_N)
        .map(|a| CountRow {
            label: a.display_name.clone(),
            count: a.count,
        })
        .collect()
}

fn institution_rows(institutions: &[InstitutionCount]) -> Vec<CountRow> {
    institutions
        .iter()
        .take(STATS_TOP_N)
        .map(|i| CountRow {
            label: i.display_name.clone(),
            count: i.count,
        })
        .collect()
}

/// Truncated, display-ordered statistics tables
pub fn stats_view(stats: &AnalysisResult) -> StatsView {
    let mut countries: Vec<CountRow> = stats
        .country_distribution
        .iter()
        .map(|(country, &count)| CountRow {
            label: country.clone(),
            count,
        })
        .collect();
    countries.sort_by_key(|row| (Reverse(row.count), row.label.clone()));
    countries.truncate(STATS_TOP_N);

    let mut years: Vec<CountRow> = stats
        .year_distribution
        .iter()
        .map(|(year, &count)| CountRow {
            label: year.clone(),
            count,
        })
        .collect();
    years.sort_by(|a, b| a.label.cmp(&b.label));

    StatsView {
        top_authors: author_rows(&stats.top_authors),
        top_institutions: institution_rows(&stats.top_institutions),
        top_countries: countries,
        years,
    }
}

/// Details of the publication currently opened, if any
pub fn get_open_publication(snapshot: &QuerySnapshot) -> Option<PublicationDetails> {
    snapshot.open_publication.as_ref().map(publication_details)
}

pub fn publication_details(publication: &Publication) -> PublicationDetails {
    PublicationDetails {
        title: publication.title.clone(),
        byline: format_byline_with_year(publication),
        cited_by_count: publication.cited_by_count,
        source_url: publication.source_url().map(str::to_string),
        venue: publication.location_display_name.clone(),
    }
}
