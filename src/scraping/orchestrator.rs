//! # Scrape Orchestrator
//!
//! Coordinates fetch, parse and merge across the catalog page range under one
//! of two execution strategies. Holds no state between runs: every invocation
//! builds and returns a fresh [`ScrapeResult`].

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::{ScrapeMode, ScrapeResult};
use crate::domain::services::PageFetcher;
use crate::infrastructure::html_parser::CatalogPageParser;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound on the page range, inclusive.
    pub page_range_limit: u32,

    /// In-flight request bound for the concurrent strategy.
    pub max_concurrent_requests: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        use crate::infrastructure::config::defaults;
        Self {
            page_range_limit: defaults::PAGE_RANGE_LIMIT,
            max_concurrent_requests: defaults::MAX_CONCURRENT_REQUESTS,
        }
    }
}

pub struct ScrapeOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    parser: CatalogPageParser,
    config: OrchestratorConfig,
}

impl ScrapeOrchestrator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: CatalogPageParser,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            fetcher,
            parser,
            config,
        }
    }

    /// Run one scrape under the given strategy.
    ///
    /// Always returns the accumulated result, even when every page failed: an
    /// empty result is indistinguishable from an empty catalog at this
    /// boundary.
    pub async fn run(&self, mode: ScrapeMode) -> ScrapeResult {
        let run_id = Uuid::new_v4();
        info!(%run_id, ?mode, "Starting scrape run");

        let result = match mode {
            ScrapeMode::Sequential => self.run_sequential().await,
            ScrapeMode::Concurrent => self.run_concurrent().await,
        };

        info!(%run_id, models = result.len(), "Scrape run finished");
        result
    }

    /// Walk pages in ascending order, stopping at the first failed fetch or
    /// the page cap. Merge order is page order, so a duplicate model resolves
    /// deterministically to the later page's price.
    async fn run_sequential(&self) -> ScrapeResult {
        let mut result = ScrapeResult::new();

        for page in 1..=self.config.page_range_limit {
            match self.fetcher.fetch_page(page).await {
                Ok(html) => {
                    let items = self.parser.extract_items(&html);
                    info!(page, items = items.len(), "Parsed list page");
                    result.merge_items(items);
                }
                Err(e) => {
                    info!(page, error = %e, "Stopping sequential scrape");
                    break;
                }
            }
        }

        result
    }

    /// Fetch the whole page range concurrently. Every page in range is
    /// requested regardless of sibling failures; a failed page contributes
    /// nothing. Fan-out is bounded by `max_concurrent_requests`. Merging
    /// happens on this task in completion order, so a duplicate model across
    /// pages resolves non-deterministically.
    async fn run_concurrent(&self) -> ScrapeResult {
        let limit = self.config.max_concurrent_requests.max(1);
        let parser = &self.parser;

        let mut page_results = stream::iter(1..=self.config.page_range_limit)
            .map(|page| {
                let fetcher = Arc::clone(&self.fetcher);
                async move {
                    match fetcher.fetch_page(page).await {
                        Ok(html) => {
                            let items = parser.extract_items(&html);
                            info!(page, items = items.len(), "Parsed list page");
                            items
                        }
                        Err(e) => {
                            warn!(page, error = %e, "Page fetch failed, no records contributed");
                            Vec::new()
                        }
                    }
                }
            })
            .buffer_unordered(limit);

        let mut result = ScrapeResult::new();
        while let Some(items) = page_results.next().await {
            result.merge_items(items);
        }

        result
    }
}
