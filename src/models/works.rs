//! Raw records from the OpenAlex works endpoint, limited to the fields
//! requested through `select=doi,authorships,title,publication_date`.

use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawAuthor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawInstitution {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawAuthorship {
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institutions: Vec<RawInstitution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawPublication {
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorships: Vec<RawAuthorship>,
}

impl RawPublication {
    /// Publication year as the first four characters of `publication_date`.
    pub fn year(&self) -> Option<String> {
        let date = self.publication_date.as_deref()?.trim();
        if date.is_empty() {
            return None;
        }
        Some(date.chars().take(4).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorksMeta {
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorksResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawPublication>,
    #[serde(default)]
    pub meta: Option<WorksMeta>,
}
