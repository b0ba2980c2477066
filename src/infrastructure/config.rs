//! Configuration infrastructure
//!
//! JSON configuration stored under the platform config directory, loaded on
//! startup and created with defaults on first run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::infrastructure::http_client::HttpClientConfig;

/// Default values shared between the config structs and the components that
/// can run without a config file.
pub mod defaults {
    pub const LIST_URL_TEMPLATE: &str = "https://m-velo.by/velosipedy?cpage=page-";
    pub const PAGE_RANGE_LIMIT: u32 = 10;
    pub const MAX_CONCURRENT_REQUESTS: usize = 10;
    pub const DATABASE_FILE_NAME: &str = "velo_catalog.db";
    pub const LOG_LEVEL: &str = "info";
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub scraping: ScrapingConfig,
    pub http: HttpClientConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingConfig {
    /// URL template for catalog list pages; the page number is appended
    /// verbatim.
    pub list_url_template: String,

    /// Upper bound on the page range, inclusive.
    pub page_range_limit: u32,

    /// In-flight request bound for the concurrent strategy.
    pub max_concurrent_requests: usize,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            list_url_template: defaults::LIST_URL_TEMPLATE.to_string(),
            page_range_limit: defaults::PAGE_RANGE_LIMIT,
            max_concurrent_requests: defaults::MAX_CONCURRENT_REQUESTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
}

impl DatabaseConfig {
    pub fn database_url(&self) -> String {
        format!("sqlite:{}", self.database_path.display())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("velo-tracker").join(defaults::DATABASE_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub console_output: bool,
    pub file_output: bool,
    /// Log directory; the platform data dir is used when absent.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            console_output: true,
            file_output: false,
            log_dir: None,
        }
    }
}

/// Loads and saves the application configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Platform config directory not available")?
            .join("velo-tracker");

        Ok(Self {
            config_path: config_dir.join("config.json"),
        })
    }

    /// Use an explicit config file path instead of the platform default.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the configuration, writing a default file on first run.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            let config = AppConfig::default();
            self.save_config(&config).await?;
            info!("Created default config at {}", self.config_path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config: {}", self.config_path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", self.config_path.display()))
    }

    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write config: {}", self.config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_catalog_contract() {
        let config = AppConfig::default();
        assert_eq!(
            config.scraping.list_url_template,
            "https://m-velo.by/velosipedy?cpage=page-"
        );
        assert_eq!(config.scraping.page_range_limit, 10);
        assert_eq!(config.scraping.max_concurrent_requests, 10);
        assert!(config.database.database_url().starts_with("sqlite:"));
    }

    #[tokio::test]
    async fn first_load_creates_default_file_and_round_trips() -> Result<()> {
        let temp_dir = tempdir()?;
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json"));

        let config = manager.load_config().await?;
        assert!(manager.config_path().exists());
        assert_eq!(config.scraping.page_range_limit, 10);

        let mut changed = config;
        changed.scraping.page_range_limit = 3;
        manager.save_config(&changed).await?;

        let reloaded = manager.load_config().await?;
        assert_eq!(reloaded.scraping.page_range_limit, 3);

        Ok(())
    }
}
