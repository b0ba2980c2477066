//! Domain module - core entities and the contracts the pipeline depends on
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod entities;
pub mod repositories;
pub mod services;

pub use entities::{CatalogItem, ScrapeMode, ScrapeResult, Session, SessionItem};
pub use repositories::SessionRepository;
pub use services::{FetchError, PageFetcher};
