use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY_BACKEND_URL: &str = "https://etai-backend-537a5149f0b1.herokuapp.com";
pub const DEFAULT_OPENALEX_URL: &str = "https://api.openalex.org";
/// OpenAlex caps `per_page` at 200.
pub const MAX_WORKS_PER_PAGE: u32 = 200;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_summary_backend_url() -> String {
    DEFAULT_SUMMARY_BACKEND_URL.to_string()
}

fn default_openalex_url() -> String {
    DEFAULT_OPENALEX_URL.to_string()
}

fn default_works_per_page() -> u32 {
    MAX_WORKS_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    #[serde(default = "default_summary_backend_url")]
    pub summary_backend_url: String,
    #[serde(default = "default_openalex_url")]
    pub openalex_url: String,
    #[serde(default = "default_works_per_page")]
    pub works_per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Contact address sent to OpenAlex to join the polite pool.
    #[serde(default)]
    pub openalex_mailto: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            summary_backend_url: default_summary_backend_url(),
            openalex_url: default_openalex_url(),
            works_per_page: default_works_per_page(),
            request_timeout_secs: default_timeout_secs(),
            openalex_mailto: None,
        }
    }
}

impl AppSettings {
    /// Apply `CITELENS_BACKEND_URL`, `OPENALEX_API_URL` and `OPENALEX_MAILTO`
    /// on top of the stored values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CITELENS_BACKEND_URL").filter(|v| !v.trim().is_empty()) {
            self.summary_backend_url = url;
        }
        if let Some(url) = lookup("OPENALEX_API_URL").filter(|v| !v.trim().is_empty()) {
            self.openalex_url = url;
        }
        if let Some(mailto) = lookup("OPENALEX_MAILTO").filter(|v| !v.trim().is_empty()) {
            self.openalex_mailto = Some(mailto);
        }
        self
    }

    pub fn works_per_page(&self) -> u32 {
        self.works_per_page.clamp(1, MAX_WORKS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"openalex_mailto": "lab@example.org"}"#).unwrap();
        assert_eq!(settings.summary_backend_url, DEFAULT_SUMMARY_BACKEND_URL);
        assert_eq!(settings.openalex_url, DEFAULT_OPENALEX_URL);
        assert_eq!(settings.works_per_page, 200);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.openalex_mailto.as_deref(), Some("lab@example.org"));
    }

    #[test]
    fn test_overrides_replace_non_empty_values() {
        let settings = AppSettings::default().with_overrides(|key| match key {
            "CITELENS_BACKEND_URL" => Some("http://localhost:5000".to_string()),
            "OPENALEX_API_URL" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(settings.summary_backend_url, "http://localhost:5000");
        assert_eq!(settings.openalex_url, DEFAULT_OPENALEX_URL);
        assert!(settings.openalex_mailto.is_none());
    }

    #[test]
    fn test_works_per_page_is_clamped() {
        let mut settings = AppSettings::default();
        settings.works_per_page = 500;
        assert_eq!(settings.works_per_page(), 200);
        settings.works_per_page = 0;
        assert_eq!(settings.works_per_page(), 1);
    }
}
