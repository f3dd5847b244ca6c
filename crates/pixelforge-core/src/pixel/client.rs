//! Generation backend for the Gemini REST API
//!
//! Sends a single `generateContent` call per request. There is no retry and
//! no client-side timeout; a caller that wants one drops the future.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::error::{Error, Result, TransportError};

use super::content::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Gemini API base URL
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can answer a `generateContent` request
///
/// The transformation client only talks to this trait, so tests can swap in
/// a scripted backend instead of the network.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Perform exactly one generation round-trip
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, TransportError>;
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Arc<T> {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, TransportError> {
        (**self).generate_content(request).await
    }
}

/// HTTP backend for the Gemini API
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for GeminiClient
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl Default for GeminiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (defaults to the public Gemini endpoint)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the GeminiClient
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::ApiKeyMissing)?;

        let http_client = HttpClient::builder().build().map_err(Error::NetworkError)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(GeminiClient {
            http_client,
            api_key,
            base_url,
        })
    }
}

impl GeminiClient {
    /// Create a new GeminiClient with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        GeminiClientBuilder::new().api_key(api_key).build()
    }

    /// Create a new builder
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Endpoint URL for a model
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent", self.base_url, model_path)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, TransportError> {
        let url = self.endpoint(&request.model);

        debug!(model = %request.model, parts = request.parts().len(), "Sending generateContent request");

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()).with_status(status.as_u16()))?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::new(format!("Failed to parse response: {}", e)))
    }
}

/// Map a non-success response to a transport error
///
/// Prefers the message in Google's error envelope; falls back to the raw
/// body; carries no message at all when the body is empty.
fn error_from_status(status: u16, body: &str) -> TransportError {
    let envelope_message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.trim().is_empty());

    let error = match envelope_message {
        Some(message) => TransportError::new(message),
        None if body.trim().is_empty() => TransportError::silent(),
        None => TransportError::new(format!("HTTP error {}: {}", status, body.trim())),
    };

    error.with_status(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = GeminiClientBuilder::new().build();
        assert!(matches!(result, Err(Error::ApiKeyMissing)));

        let result = GeminiClientBuilder::new().api_key("  ").build();
        assert!(matches!(result, Err(Error::ApiKeyMissing)));
    }

    #[test]
    fn test_builder_with_api_key() {
        let result = GeminiClientBuilder::new().api_key("test-key").build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::builder()
            .api_key("test-key")
            .base_url("http://localhost:8080/v1beta/")
            .build()
            .unwrap();

        assert_eq!(
            client.endpoint("gemini-2.5-flash-image"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
        assert_eq!(
            client.endpoint("models/gemini-2.5-flash-image"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains(GEMINI_BASE_URL));
    }

    #[test]
    fn test_error_from_status_uses_envelope_message() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let error = error_from_status(429, body);
        assert_eq!(error.message.as_deref(), Some("quota exceeded"));
        assert_eq!(error.status, Some(429));
    }

    #[test]
    fn test_error_from_status_falls_back_to_body() {
        let error = error_from_status(502, "Bad Gateway");
        assert_eq!(error.message.as_deref(), Some("HTTP error 502: Bad Gateway"));
    }

    #[test]
    fn test_error_from_status_empty_body_has_no_message() {
        let error = error_from_status(500, "");
        assert_eq!(error.message, None);
        assert_eq!(error.status, Some(500));
    }
}
