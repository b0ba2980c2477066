//! Repository interfaces for session storage
//!
//! Trait definitions for the data access patterns the application layer
//! depends on. Implementations live in the infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{ScrapeResult, Session, SessionItem};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist one completed run: a session row with `items_count` equal to
    /// the result size, plus one item row per record, committed as a single
    /// transaction. Returns the new session id.
    async fn save_session(&self, result: &ScrapeResult) -> Result<i64>;

    /// All sessions, in insertion order.
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// All items attributed to the given session.
    async fn list_items(&self, session_id: i64) -> Result<Vec<SessionItem>>;

    /// Delete every session and item, leaving empty, usable storage behind.
    async fn clear(&self) -> Result<()>;
}
