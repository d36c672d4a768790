use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorCount {
    pub id: String,
    pub display_name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstitutionCount {
    pub id: String,
    pub display_name: String,
    pub count: u32,
}

/// Publication statistics for one query. Derived on every query and never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalysisResult {
    /// All authors, most frequent first. Ties keep first-seen order.
    pub top_authors: Vec<AuthorCount>,
    /// All institutions, most frequent first. Ties keep first-seen order.
    pub top_institutions: Vec<InstitutionCount>,
    pub country_distribution: HashMap<String, u32>,
    pub year_distribution: HashMap<String, u32>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.top_authors.is_empty()
            && self.top_institutions.is_empty()
            && self.country_distribution.is_empty()
            && self.year_distribution.is_empty()
    }
}
