//! HTML extraction for m-velo catalog list pages
//!
//! Pulls (model, price) records out of a list page using the site's
//! structural selectors. The model lives in the `title` attribute of the
//! product name link; the raw price lives in the `content` attribute of a
//! price metadata node.

use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use tracing::debug;

use crate::domain::entities::CatalogItem;

/// Literal prefix the site puts in front of every model title. The stored
/// naming scheme keeps everything after the last occurrence, so this boundary
/// must not change.
const MODEL_TITLE_PREFIX: &str = "Велосипед";

const MODEL_SELECTOR: &str = "div.products__name.hidden-xs > a";
const PRICE_SELECTOR: &str = "div.prices__values.prices__values_simple > div > meta";

pub struct CatalogPageParser {
    model_selector: Selector,
    price_selector: Selector,
}

impl CatalogPageParser {
    pub fn new() -> Result<Self> {
        let model_selector = Selector::parse(MODEL_SELECTOR)
            .map_err(|e| anyhow!("invalid model selector '{MODEL_SELECTOR}': {e}"))?;
        let price_selector = Selector::parse(PRICE_SELECTOR)
            .map_err(|e| anyhow!("invalid price selector '{PRICE_SELECTOR}': {e}"))?;

        Ok(Self {
            model_selector,
            price_selector,
        })
    }

    /// Extract (model, price) records from one list page.
    ///
    /// Model and price nodes pair positionally: the shorter sequence bounds
    /// the output and surplus nodes on the longer side are dropped. Nodes
    /// missing the expected attribute are skipped before pairing. Malformed
    /// documents yield an empty or partial set, never an error.
    pub fn extract_items(&self, html: &str) -> Vec<CatalogItem> {
        let document = Html::parse_document(html);

        let models: Vec<&str> = document
            .select(&self.model_selector)
            .filter_map(|node| node.value().attr("title"))
            .collect();
        let prices: Vec<&str> = document
            .select(&self.price_selector)
            .filter_map(|node| node.value().attr("content"))
            .collect();

        let items: Vec<CatalogItem> = models
            .into_iter()
            .zip(prices)
            .map(|(title, price)| CatalogItem {
                model_name: strip_model_prefix(title).to_string(),
                price_text: price.to_string(),
            })
            .collect();

        debug!("Extracted {} catalog items", items.len());
        items
    }
}

/// Keep everything after the last occurrence of the title prefix; titles
/// without the prefix pass through whole.
fn strip_model_prefix(title: &str) -> &str {
    match title.rsplit(MODEL_TITLE_PREFIX).next() {
        Some(rest) => rest,
        None => title,
    }
}
