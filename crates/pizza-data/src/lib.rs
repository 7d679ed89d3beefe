//! HTTP client for the pizza storefront backend.
//!
//! [`FetchClient`] is a small builder-style wrapper over `reqwest` that joins
//! paths onto a base URL and reads whole responses. [`HttpPizzaApi`] uses it to
//! implement the [`PizzaApi`](pizza_commerce::PizzaApi) collaborator.
//!
//! # Example
//!
//! ```rust,ignore
//! use pizza_data::{ApiConfig, HttpPizzaApi};
//! use pizza_commerce::PizzaApi;
//!
//! let api = HttpPizzaApi::new(&ApiConfig::from_env())?;
//! let pizzas = api.fetch_catalog().await?;
//! ```

mod api;
mod config;
mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

pub use api::{past_order_url, HttpPizzaApi, CATALOG_PATH, ORDER_PATH};
pub use config::{ApiConfig, API_URL_ENV, DEFAULT_API_URL};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// HTTP client for outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    /// Wrap a preconfigured `reqwest` client.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: None,
        }
    }

    /// Build a client for the configured backend.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(http).with_base_url(config.base_url()))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve(url.into());
        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, full_url),
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// The request as it will be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and read the whole response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let mut request = self.http.request(method.into(), url.as_str());
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let started = Instant::now();
        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(
            method = method.as_str(),
            url = %url,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend request"
        );

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiConfig, FetchClient, FetchError, HttpPizzaApi, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_onto_base_url() {
        let client = FetchClient::new().with_base_url("http://localhost:3000/");
        let request = client.get("/api/pizzas");
        assert_eq!(request.as_request().url(), "http://localhost:3000/api/pizzas");
    }

    #[test]
    fn test_absolute_urls_bypass_base() {
        let client = FetchClient::new().with_base_url("http://localhost:3000");
        let request = client.get("https://cdn.example/menu.json");
        assert_eq!(request.as_request().url(), "https://cdn.example/menu.json");
    }

    #[test]
    fn test_accept_header_is_applied() {
        let client = FetchClient::new().with_base_url("http://localhost:3000");
        let request = client.get("/api/pizzas").accept("application/json");
        assert_eq!(
            request.as_request().headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.as_request().method(), Method::Get);
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let result = FetchClient::from_config(&ApiConfig::new("not a url"));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));

        let result = FetchClient::from_config(&ApiConfig::new("http://bad host:3000"));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
