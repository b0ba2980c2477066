//! Data Transfer Objects for the UI boundary
//!
//! Plain serializable structs the desktop front end renders; conversions from
//! domain entities live here so the use cases stay thin.

use serde::Serialize;

use crate::domain::entities::{Session, SessionItem};

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub session_id: i64,
    pub timestamp: String,
    pub items_count: i64,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id,
            timestamp: session.timestamp,
            items_count: session.items_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionItemDto {
    pub session_id: i64,
    pub model_name: String,
    pub price_text: String,
}

impl From<SessionItem> for SessionItemDto {
    fn from(item: SessionItem) -> Self {
        Self {
            session_id: item.session_id,
            model_name: item.model_name,
            price_text: item.price_text,
        }
    }
}

/// Outcome of a run-and-store invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRunSummary {
    pub session_id: i64,
    pub items_count: usize,
}
