//! Domain entities
//!
//! Contains the core business entities shared by the scraping pipeline and
//! the session store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Execution strategy for a scraping run. User-facing mode, not an internal
/// optimization knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapeMode {
    /// Walk pages in ascending order, stopping at the first failed fetch or
    /// the configured page cap.
    Sequential,
    /// Fetch the whole page range concurrently and merge pages as they
    /// complete.
    Concurrent,
}

/// One (model, price) record extracted from a catalog list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub model_name: String,
    /// Raw price text as it appears on the page. May carry currency symbols
    /// and thousands separators; numeric interpretation belongs to the query
    /// layer.
    pub price_text: String,
}

impl CatalogItem {
    pub fn new(model_name: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            price_text: price_text.into(),
        }
    }
}

/// Accumulated output of one scraping run: model name -> raw price text.
///
/// Duplicate model names resolve last-write-wins. The write order is page
/// order under [`ScrapeMode::Sequential`] and completion order under
/// [`ScrapeMode::Concurrent`], so only the sequential strategy overwrites
/// deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeResult {
    items: HashMap<String, String>,
}

impl ScrapeResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one record, replacing any earlier price for the same model.
    pub fn merge_item(&mut self, item: CatalogItem) {
        self.items.insert(item.model_name, item.price_text);
    }

    /// Merge a batch of records in order.
    pub fn merge_items(&mut self, items: Vec<CatalogItem>) {
        for item in items {
            self.merge_item(item);
        }
    }

    pub fn price_of(&self, model_name: &str) -> Option<&str> {
        self.items.get(model_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.items.iter()
    }
}

/// One completed scraping run as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    /// Wall-clock start of the run, formatted `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub items_count: i64,
}

/// One stored (model, price) record attributed to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionItem {
    pub model_name: String,
    pub price_text: String,
    pub session_id: i64,
}
