use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthorPosition {
    First,
    Middle,
    Last,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Affiliation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_affiliation_string: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Institution {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Authorship {
    pub author: Author,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_position: AuthorPosition,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institutions: Vec<Institution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_corresponding: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<Affiliation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_affiliation_strings: Vec<String>,
}

impl Authorship {
    pub fn is_lead(&self) -> bool {
        self.author_position == AuthorPosition::First
    }
}

/// A bibliography entry returned by the summary service.
///
/// `id` is the work's URL and doubles as the markdown citation target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Publication {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(rename = "abstract", default, deserialize_with = "null_as_default")]
    pub r#abstract: String,
    #[serde(default)]
    pub pub_year: Option<i32>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cited_by_count: u64,
    #[serde(default)]
    pub location_display_name: Option<String>,
    #[serde(default)]
    pub location_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorships: Vec<Authorship>,
}

impl Publication {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            doi: None,
            r#abstract: String::new(),
            pub_year: None,
            pub_date: None,
            cited_by_count: 0,
            location_display_name: None,
            location_url: None,
            authorships: Vec::new(),
        }
    }

    /// Link a reader should follow for the full text: DOI first, then the
    /// hosting location.
    pub fn source_url(&self) -> Option<&str> {
        self.doi.as_deref().or(self.location_url.as_deref())
    }
}
