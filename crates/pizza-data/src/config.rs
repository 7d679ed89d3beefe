//! Backend connection settings.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "PIZZA_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:3000`. Paths are appended to it.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: None,
        }
    }

    /// Read the base URL from [`API_URL_ENV`], falling back to the default.
    pub fn from_env() -> Self {
        Self::default().with_env_override(std::env::var(API_URL_ENV).ok())
    }

    /// Replace the URL with a non-empty environment value.
    pub fn with_env_override(mut self, env_value: Option<String>) -> Self {
        if let Some(url) = env_value.filter(|v| !v.trim().is_empty()) {
            self.url = url;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Parse the URL. It must be an absolute http(s) URL with a host.
    pub fn parsed_url(&self) -> Result<Url, FetchError> {
        let url = Url::parse(self.url.trim())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.url
            )));
        }
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(url),
            _ => Err(FetchError::InvalidUrl(format!("{}: missing host", self.url))),
        }
    }

    /// Check that the URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), FetchError> {
        self.parsed_url().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_env_override() {
        let config = ApiConfig::default().with_env_override(Some("https://pizza.example".into()));
        assert_eq!(config.url, "https://pizza.example");

        let config = ApiConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.url, DEFAULT_API_URL);

        let config = ApiConfig::default().with_env_override(None);
        assert_eq!(config.url, DEFAULT_API_URL);
    }

    #[test]
    fn test_base_url_trims_slash() {
        assert_eq!(ApiConfig::new("http://api.local/").base_url(), "http://api.local");
    }

    #[test]
    fn test_validate() {
        assert!(ApiConfig::new("http://localhost:3000").validate().is_ok());
        assert!(ApiConfig::new("https://pizza.example").validate().is_ok());
        assert!(ApiConfig::new("localhost:3000").validate().is_err());
        assert!(ApiConfig::new("http://").validate().is_err());
        assert!(ApiConfig::new("ftp://pizza.example").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_hosts() {
        for url in ["http://bad host", "http://:::", "http://a b/c", "http://[::1"] {
            let result = ApiConfig::new(url).validate();
            assert!(
                matches!(result, Err(FetchError::InvalidUrl(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_parsed_url_exposes_host() {
        let url = ApiConfig::new("http://127.0.0.1:3000/").parsed_url().unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn test_toml_shape() {
        let config: ApiConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }
}
