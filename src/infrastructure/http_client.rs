//! HTTP client for catalog scraping
//!
//! Thin wrapper over reqwest. One instance is shared by every fetch in a run,
//! so concurrent page tasks reuse a single connection pool instead of opening
//! independent network sessions.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

/// HTTP client configuration for scraping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "velo-tracker/0.3".to_string(),
            timeout_seconds: 30,
            follow_redirects: true,
        }
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Issue a GET and hand back the raw response.
    ///
    /// Status checking is the caller's business: a non-2xx page is a signal
    /// for the scraping pipeline, not an error. Only transport-level failures
    /// (DNS, connect, timeout) surface as `Err`.
    pub async fn fetch_response(&self, url: &str) -> Result<Response> {
        tracing::debug!("Fetching URL: {}", url);

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch URL: {url}"))
    }
}
