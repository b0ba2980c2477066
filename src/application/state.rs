//! Application state assembly
//!
//! Builds the full stack from the configuration file: logging, database,
//! repositories and use cases. The desktop shell calls [`AppState::initialize`]
//! once at startup and keeps the returned state for the process lifetime.

use anyhow::Result;
use std::sync::Arc;

use crate::application::use_cases::{ScrapeUseCases, SessionQueryUseCases};
use crate::infrastructure::config::{AppConfig, ConfigManager};
use crate::infrastructure::logging::init_logging_with_config;
use crate::infrastructure::{
    CatalogPageParser, DatabaseConnection, HttpClient, HttpPageFetcher, SqliteSessionRepository,
};
use crate::scraping::{OrchestratorConfig, ScrapeOrchestrator};

pub struct AppState {
    pub scrape: ScrapeUseCases,
    pub queries: SessionQueryUseCases,
    pub config: AppConfig,
}

impl AppState {
    /// Load (or create) the config file, initialize logging, and assemble the
    /// stack.
    pub async fn initialize() -> Result<Self> {
        let config = ConfigManager::new()?.load_config().await?;
        init_logging_with_config(&config.logging)?;
        Self::from_config(config).await
    }

    /// Assemble the stack from an already-loaded configuration. Does not touch
    /// the global logging subscriber.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let db = DatabaseConnection::new(&config.database.database_url()).await?;
        db.migrate().await?;
        let repo = Arc::new(SqliteSessionRepository::new(db.pool().clone()));

        let http = Arc::new(HttpClient::new(&config.http)?);
        let fetcher = Arc::new(HttpPageFetcher::new(
            http,
            config.scraping.list_url_template.clone(),
        )?);

        let orchestrator = ScrapeOrchestrator::new(
            fetcher,
            CatalogPageParser::new()?,
            OrchestratorConfig {
                page_range_limit: config.scraping.page_range_limit,
                max_concurrent_requests: config.scraping.max_concurrent_requests,
            },
        );

        Ok(Self {
            scrape: ScrapeUseCases::new(orchestrator, repo.clone()),
            queries: SessionQueryUseCases::new(repo),
            config,
        })
    }
}
