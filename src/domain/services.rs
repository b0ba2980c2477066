//! Service contracts the scraping pipeline depends on

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single page fetch.
///
/// Page-local by contract: the orchestrator consumes it to stop (sequential)
/// or skip (concurrent) and never propagates it past its own boundary.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("HTTP request failed with status {status}: {url}")]
    BadStatus { status: u16, url: String },

    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },
}

/// Retrieves the raw HTML of one catalog list page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError>;
}
