//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Longest error body echoed back in an [`FetchError::HttpError`].
const MAX_ERROR_BODY: usize = 200;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let mut message = String::from_utf8_lossy(&self.body).trim().to_string();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
                message.push_str("...");
            }
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizza_commerce::catalog::PizzaType;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(302, b"").is_success());
        assert!(!make_response(500, b"").is_success());
    }

    #[test]
    fn test_response_json_catalog() {
        let resp = make_response(
            200,
            br#"[{"id": "veggie", "name": "Veggie", "sizes": {"M": 9}}]"#,
        );
        let pizzas: Vec<PizzaType> = resp.json().unwrap();
        assert_eq!(pizzas.len(), 1);
        assert_eq!(pizzas[0].sizes.as_ref().unwrap()["M"], 9.0);
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"<html>oops</html>");
        let result: Result<Vec<PizzaType>, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());

        let err = make_response(500, b"kitchen on fire").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: kitchen on fire");
    }

    #[test]
    fn test_error_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = make_response(502, body.as_bytes()).error_for_status().unwrap_err();
        match err {
            FetchError::HttpError { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY + 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
