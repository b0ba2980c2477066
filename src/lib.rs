//! Velo Tracker - bicycle catalog price history backend
//!
//! Library core for a desktop application that scrapes paginated product
//! listings from the m-velo.by catalog, records each run as a session in
//! SQLite and answers the history/search queries the UI displays.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod scraping;

// Re-export the types a front end touches most
pub use domain::{CatalogItem, ScrapeMode, ScrapeResult};
