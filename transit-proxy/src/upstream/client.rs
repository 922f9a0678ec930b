//! HTTP transport shared by the rail and bus clients.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::bus::DEFAULT_BUS_BASE_URL;
use super::error::UpstreamError;
use super::mock::MockFetcher;
use super::rail::DEFAULT_RAIL_BASE_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the upstream clients.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Train Tracker arrivals endpoint
    pub rail_base_url: String,
    /// Bus Tracker predictions endpoint
    pub bus_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Set a custom rail endpoint (for testing).
    pub fn with_rail_base_url(mut self, url: impl Into<String>) -> Self {
        self.rail_base_url = url.into();
        self
    }

    /// Set a custom bus endpoint (for testing).
    pub fn with_bus_base_url(mut self, url: impl Into<String>) -> Self {
        self.bus_base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            rail_base_url: DEFAULT_RAIL_BASE_URL.to_string(),
            bus_base_url: DEFAULT_BUS_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Issues a GET request and returns the response body.
///
/// Implementations must map non-success statuses to errors; callers only
/// ever see a body for a 2xx response.
pub trait Fetcher: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured timeout.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, UpstreamError> {
        debug!(url, "upstream request");

        // The API key travels in the query string, so strip URLs from
        // transport errors before they reach logs or responses.
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(UpstreamError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;
        debug!(url, bytes = body.len(), "upstream response");

        Ok(body)
    }
}

/// The fetcher chosen at startup: live HTTP or canned responses.
#[derive(Debug, Clone)]
pub enum UpstreamFetcher {
    Http(HttpFetcher),
    Mock(MockFetcher),
}

impl Fetcher for UpstreamFetcher {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, UpstreamError> {
        match self {
            UpstreamFetcher::Http(fetcher) => fetcher.get(url, query).await,
            UpstreamFetcher::Mock(fetcher) => fetcher.get(url, query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = UpstreamConfig::default();

        assert_eq!(config.rail_base_url, DEFAULT_RAIL_BASE_URL);
        assert_eq!(config.bus_base_url, DEFAULT_BUS_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builder() {
        let config = UpstreamConfig::default()
            .with_rail_base_url("http://localhost:8080/rail")
            .with_bus_base_url("http://localhost:8080/bus")
            .with_timeout(5);

        assert_eq!(config.rail_base_url, "http://localhost:8080/rail");
        assert_eq!(config.bus_base_url, "http://localhost:8080/bus");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn http_fetcher_creation() {
        assert!(HttpFetcher::new(&UpstreamConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn enum_delegates_to_mock() {
        let mock = MockFetcher::default().with_rail("41380", r#"{"ok":true}"#);
        let fetcher = UpstreamFetcher::Mock(mock.clone());

        let body = fetcher
            .get(DEFAULT_RAIL_BASE_URL, &[("mapid", "41380")])
            .await
            .unwrap();

        assert_eq!(body, r#"{"ok":true}"#);
        assert_eq!(mock.requests().len(), 1);
    }
}
