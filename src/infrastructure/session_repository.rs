//! SQLite-backed session storage
//!
//! Implements [`SessionRepository`] on top of an sqlx pool. A run is stored
//! as one session row plus its item rows in a single transaction; `clear`
//! reproduces the original storage behavior of dropping and recreating both
//! tables.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::domain::entities::{ScrapeResult, Session, SessionItem};
use crate::domain::repositories::SessionRepository;
use crate::infrastructure::database_connection::{
    CREATE_ITEMS_INDEX_SQL, CREATE_ITEMS_TABLE_SQL, CREATE_SESSIONS_TABLE_SQL,
};

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn save_session(&self, result: &ScrapeResult) -> Result<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin session transaction")?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let session_id =
            sqlx::query("INSERT INTO scraping_sessions (timestamp, items_count) VALUES (?, ?)")
                .bind(&timestamp)
                .bind(result.len() as i64)
                .execute(&mut *tx)
                .await
                .context("Failed to insert session row")?
                .last_insert_rowid();

        for (model_name, price_text) in result.iter() {
            sqlx::query(
                "INSERT INTO catalog_items (model_name, price_text, session_ref) VALUES (?, ?, ?)",
            )
            .bind(model_name)
            .bind(price_text)
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .context("Failed to insert catalog item")?;
        }

        tx.commit().await.context("Failed to commit session")?;

        info!(session_id, items = result.len(), "Stored scraping session");
        Ok(session_id)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let rows = sqlx::query(
            "SELECT session_id, timestamp, items_count FROM scraping_sessions ORDER BY session_id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load sessions")?;

        Ok(rows
            .into_iter()
            .map(|row| Session {
                id: row.get("session_id"),
                timestamp: row.get("timestamp"),
                items_count: row.get("items_count"),
            })
            .collect())
    }

    async fn list_items(&self, session_id: i64) -> Result<Vec<SessionItem>> {
        let rows = sqlx::query(
            "SELECT model_name, price_text, session_ref FROM catalog_items WHERE session_ref = ?",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to load items for session {session_id}"))?;

        Ok(rows
            .into_iter()
            .map(|row| SessionItem {
                model_name: row.get("model_name"),
                price_text: row.get("price_text"),
                session_id: row.get("session_ref"),
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS scraping_sessions")
            .execute(&self.pool)
            .await
            .context("Failed to drop sessions table")?;
        sqlx::query("DROP TABLE IF EXISTS catalog_items")
            .execute(&self.pool)
            .await
            .context("Failed to drop items table")?;

        sqlx::query(CREATE_SESSIONS_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEMS_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEMS_INDEX_SQL).execute(&self.pool).await?;

        info!("Cleared session storage");
        Ok(())
    }
}
