use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::publication::Publication;

/// A key finding; `title` is unique within a response and doubles as the
/// expand/collapse key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clean_query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub introduction_summary: String,
    #[serde(default)]
    pub query_answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_findings: Vec<Finding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_queries: Vec<String>,
}

impl Summary {
    /// Heading shown above the narrative: the cleaned query when the service
    /// answered it directly, otherwise the generated title.
    pub fn heading(&self) -> &str {
        match self.query_answer {
            Some(_) if !self.clean_query.is_empty() => &self.clean_query,
            _ => &self.title,
        }
    }

    /// Narrative body: the direct answer if present, otherwise the
    /// introduction.
    pub fn body(&self) -> &str {
        self.query_answer
            .as_deref()
            .unwrap_or(&self.introduction_summary)
    }

    pub fn finding(&self, title: &str) -> Option<&Finding> {
        self.key_findings.iter().find(|f| f.title == title)
    }
}

/// Payload of `GET /query?question=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub summary: Summary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub works_partial: Vec<Publication>,
}

/// Payload of `GET /facts?question=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FactsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub facts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary(query_answer: Option<&str>) -> Summary {
        Summary {
            title: "Microplásticos en el océano".to_string(),
            clean_query: "¿Cuánto plástico hay en el mar?".to_string(),
            introduction_summary: "Introducción".to_string(),
            query_answer: query_answer.map(str::to_string),
            key_findings: vec![Finding {
                title: "Distribución".to_string(),
                summary: "Se concentran en giros".to_string(),
            }],
            related_queries: Vec::new(),
        }
    }

    #[test]
    fn test_heading_and_body_follow_query_answer() {
        let answered = sample_summary(Some("Respuesta directa"));
        assert_eq!(answered.heading(), "¿Cuánto plástico hay en el mar?");
        assert_eq!(answered.body(), "Respuesta directa");

        let unanswered = sample_summary(None);
        assert_eq!(unanswered.heading(), "Microplásticos en el océano");
        assert_eq!(unanswered.body(), "Introducción");
    }

    #[test]
    fn test_parse_summary_response() {
        let json = r#"{
            "summary": {
                "title": "T",
                "clean_query": "q",
                "introduction_summary": "intro",
                "key_findings": [{"title": "F1", "summary": "s"}],
                "related_queries": ["r1"]
            },
            "keywords": ["k"],
            "total_count": 1234,
            "works_partial": []
        }"#;

        let response: SummaryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count, 1234);
        assert!(response.summary.query_answer.is_none());
        assert!(response.summary.finding("F1").is_some());
    }

    #[test]
    fn test_finding_requires_summary() {
        let json = r#"{"summary": {"title": "T", "key_findings": [{"title": "F1"}]}}"#;
        assert!(serde_json::from_str::<SummaryResponse>(json).is_err());
    }

    #[test]
    fn test_parse_facts_with_null() {
        let facts: FactsResponse = serde_json::from_str(r#"{"facts": null}"#).unwrap();
        assert!(facts.facts.is_empty());
    }
}
