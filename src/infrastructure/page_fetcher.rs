//! List page fetcher for the m-velo catalog
//!
//! Builds the request URL by appending the page number to the configured
//! template and maps transport/status failures into the page-local
//! [`FetchError`] the orchestrator consumes.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::domain::services::{FetchError, PageFetcher};
use crate::infrastructure::http_client::HttpClient;

pub struct HttpPageFetcher {
    http: Arc<HttpClient>,
    list_url_template: String,
}

impl HttpPageFetcher {
    /// The template must itself parse as a URL; the page number is appended
    /// verbatim per the site's pagination scheme.
    pub fn new(http: Arc<HttpClient>, list_url_template: impl Into<String>) -> Result<Self> {
        let list_url_template = list_url_template.into();
        Url::parse(&list_url_template)
            .with_context(|| format!("Invalid list URL template '{list_url_template}'"))?;

        Ok(Self {
            http,
            list_url_template,
        })
    }

    fn build_list_page_url(&self, page: u32) -> String {
        format!("{}{}", self.list_url_template, page)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        let url = self.build_list_page_url(page);

        let response = self
            .http
            .fetch_response(&url)
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
                url,
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url,
            message: format!("failed to read response body: {e}"),
        })
    }
}
