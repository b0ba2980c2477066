//! Application layer module
//!
//! Use cases and data transfer objects behind the desktop UI boundary.

pub mod dto;
pub mod state;
pub mod use_cases;

pub use state::AppState;
pub use use_cases::{ScrapeUseCases, SessionQueryUseCases};
