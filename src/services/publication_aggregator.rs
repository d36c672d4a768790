//! Author, institution, country and year statistics over a page of works

use std::collections::HashMap;
use tracing::debug;

use crate::models::{AnalysisResult, AuthorCount, InstitutionCount, RawPublication};

/// Frequency counter that remembers first-seen order so equal counts keep
/// their input order after ranking.
#[derive(Default)]
struct RankedTally {
    entries: Vec<(String, String, u32)>,
    positions: HashMap<String, usize>,
}

impl RankedTally {
    fn record(&mut self, id: &str, display_name: Option<&str>) {
        match self.positions.get(id) {
            Some(&pos) => self.entries[pos].2 += 1,
            None => {
                self.positions.insert(id.to_string(), self.entries.len());
                self.entries.push((
                    id.to_string(),
                    display_name.unwrap_or_default().to_string(),
                    1,
                ));
            }
        }
    }

    /// Entries by descending count. `sort_by` is stable, so ties stay in
    /// first-seen order.
    fn into_ranked(mut self) -> Vec<(String, String, u32)> {
        self.entries.sort_by(|a, b| b.2.cmp(&a.2));
        self.entries
    }
}

/// Compute publication statistics
///
/// Every publication adds one to its year. Every authorship adds one to its
/// author, to each of its institutions and to each of its countries.
/// Records with missing identifiers are skipped rather than rejected.
pub fn analyze(publications: &[RawPublication]) -> AnalysisResult {
    let mut authors = RankedTally::default();
    let mut institutions = RankedTally::default();
    let mut country_distribution: HashMap<String, u32> = HashMap::new();
    let mut year_distribution: HashMap<String, u32> = HashMap::new();

    for publication in publications {
        if let Some(year) = publication.year() {
            *year_distribution.entry(year).or_insert(0) += 1;
        }

        for authorship in &publication.authorships {
            if let Some(author) = &authorship.author {
                if let Some(id) = author.id.as_deref() {
                    authors.record(id, author.display_name.as_deref());
                }
            }

            for institution in &authorship.institutions {
                if let Some(id) = institution.id.as_deref() {
                    institutions.record(id, institution.display_name.as_deref());
                }
            }

            for country in &authorship.countries {
                *country_distribution.entry(country.clone()).or_insert(0) += 1;
            }
        }
    }

    let top_authors: Vec<AuthorCount> = authors
        .into_ranked()
        .into_iter()
        .map(|(id, display_name, count)| AuthorCount {
            id,
            display_name,
            count,
        })
        .collect();

    let top_institutions: Vec<InstitutionCount> = institutions
        .into_ranked()
        .into_iter()
        .map(|(id, display_name, count)| InstitutionCount {
            id,
            display_name,
            count,
        })
        .collect();

    debug!(
        "Analyzed {} publications: {} authors, {} institutions, {} countries, {} years",
        publications.len(),
        top_authors.len(),
        top_institutions.len(),
        country_distribution.len(),
        year_distribution.len()
    );

    AnalysisResult {
        top_authors,
        top_institutions,
        country_distribution,
        year_distribution,
    }
}
