//! HTTP client for the pricing desk's advisory service.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use super::error::AdvisoryError;
use super::{AdvisoryProvider, AdvisoryRequest};

/// Default base URL for the advisory service.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8090";

/// Reply body of `POST /advice`.
#[derive(Debug, Deserialize)]
struct AdviceResponse {
    advice: String,
}

/// Configuration for the advisory client.
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    /// API key for x-apikey header authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AdvisoryConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the advisory service.
#[derive(Debug, Clone)]
pub struct AdvisoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl AdvisoryClient {
    /// Create a new advisory client.
    pub fn new(config: AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let mut headers = HeaderMap::new();

        let api_key_header =
            HeaderValue::from_str(&config.api_key).map_err(|_| AdvisoryError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("x-apikey"), api_key_header);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Ask for commentary on a route nothing could be priced for.
    pub async fn fetch_advice(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        let url = format!("{}/advice", self.base_url);
        debug!(origin = %request.origin, destination = %request.destination, "Requesting advice");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AdvisoryError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_advice(&body)
    }
}

impl AdvisoryProvider for AdvisoryClient {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        self.fetch_advice(request).await
    }
}

fn parse_advice(body: &str) -> Result<String, AdvisoryError> {
    let response: AdviceResponse =
        serde_json::from_str(body).map_err(|e| AdvisoryError::Json {
            message: e.to_string(),
        })?;

    let advice = response.advice.trim();
    if advice.is_empty() {
        return Err(AdvisoryError::EmptyReply);
    }
    Ok(advice.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AdvisoryConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_with_base_url() {
        let config = AdvisoryConfig::new("test-api-key")
            .with_base_url("http://localhost:8080/")
            .with_timeout_secs(3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn rejects_bad_api_key() {
        let result = AdvisoryClient::new(AdvisoryConfig::new("bad\nkey"));
        assert!(matches!(result, Err(AdvisoryError::Api { status: 0, .. })));
    }

    #[test]
    fn parses_reply() {
        assert_eq!(
            parse_advice(r#"{"advice": " Try Vostochny instead. "}"#).unwrap(),
            "Try Vostochny instead."
        );
        assert!(matches!(parse_advice(r#"{"advice": ""}"#), Err(AdvisoryError::EmptyReply)));
        assert!(matches!(parse_advice("not json"), Err(AdvisoryError::Json { .. })));
    }
}
