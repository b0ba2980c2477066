// Database connection and pool management
// This module handles SQLite database connections using sqlx

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

pub(crate) const CREATE_SESSIONS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS scraping_sessions (
        session_id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        items_count INTEGER NOT NULL
    )
"#;

pub(crate) const CREATE_ITEMS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS catalog_items (
        model_name TEXT NOT NULL,
        price_text TEXT NOT NULL,
        session_ref INTEGER NOT NULL
    )
"#;

pub(crate) const CREATE_ITEMS_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_catalog_items_session_ref ON catalog_items (session_ref)";

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create database file directory if it doesn't exist
        let db_path = if database_url.starts_with("sqlite://") {
            database_url.trim_start_matches("sqlite://")
        } else if database_url.starts_with("sqlite:") {
            database_url.trim_start_matches("sqlite:")
        } else {
            database_url
        };

        if let Some(parent) = Path::new(db_path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Ensure the database file exists by creating it if necessary
        if !Path::new(db_path).exists() {
            std::fs::File::create(db_path)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_SESSIONS_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEMS_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEMS_INDEX_SQL).execute(&self.pool).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn connection_creates_missing_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("nested").join("test.db");
        let database_url = format!("sqlite:{}", db_path.to_string_lossy());

        let db = DatabaseConnection::new(&database_url).await?;
        assert!(!db.pool().is_closed());
        assert!(db_path.exists());

        Ok(())
    }

    #[tokio::test]
    async fn migration_creates_both_tables() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test_migration.db");
        let database_url = format!("sqlite:{}", db_path.display());

        let db = DatabaseConnection::new(&database_url).await?;
        db.migrate().await?;

        for table in ["scraping_sessions", "catalog_items"] {
            let row =
                sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
                    .bind(table)
                    .fetch_optional(db.pool())
                    .await?;
            assert!(row.is_some(), "table {table} missing");
        }

        Ok(())
    }
}
